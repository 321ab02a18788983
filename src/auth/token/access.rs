//! Access token issued by the client-credentials exchange.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Bearer token used for a single inventory fetch.
///
/// The marketplace defines the lifetime; `expires_in` is kept for diagnostics only and
/// nothing schedules a refresh from it. Every catalog load requests a fresh token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
	/// Bearer secret presented to the search endpoint.
	pub secret: TokenSecret,
	/// Token type reported by the marketplace, when present.
	pub token_type: Option<String>,
	/// Lifetime reported by the marketplace, when present.
	pub expires_in: Option<Duration>,
}
impl AccessToken {
	/// Wraps a bearer string without lifetime metadata.
	pub fn bearer(secret: impl Into<String>) -> Self {
		Self { secret: TokenSecret::new(secret), token_type: None, expires_in: None }
	}

	/// Value for an `Authorization` header.
	pub fn authorization_header(&self) -> String {
		format!("Bearer {}", self.secret.expose())
	}
}

/// Wire shape of a successful token endpoint response.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
	pub(crate) access_token: TokenSecret,
	#[serde(default)]
	pub(crate) token_type: Option<String>,
	#[serde(default)]
	pub(crate) expires_in: Option<i64>,
}
impl From<TokenResponse> for AccessToken {
	fn from(response: TokenResponse) -> Self {
		Self {
			secret: response.access_token,
			token_type: response.token_type,
			expires_in: response.expires_in.filter(|secs| *secs > 0).map(Duration::seconds),
		}
	}
}
