//! Client-credentials token exchange against the marketplace identity endpoint.
//!
//! [`TokenProvider::fetch_access_token`] performs exactly one POST per call. There is no
//! token cache and no retry: every catalog load pays for a fresh exchange, and any failure
//! aborts the load.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, token::access::TokenResponse},
	config::Credentials,
	error::UpstreamAuthError,
	http::{MarketplaceHttpClient, MarketplaceRequest, ReqwestHttpClient},
	marketplace::MarketplaceDescriptor,
	obs::{self, Stage},
};

const GRANT_TYPE: &str = "client_credentials";

/// Exchanges application credentials for bearer tokens.
pub struct TokenProvider<C = ReqwestHttpClient>
where
	C: ?Sized + MarketplaceHttpClient,
{
	http_client: Arc<C>,
	descriptor: Arc<MarketplaceDescriptor>,
}
impl<C> TokenProvider<C>
where
	C: ?Sized + MarketplaceHttpClient,
{
	/// Creates a provider that reuses the caller-provided transport.
	pub fn new(http_client: Arc<C>, descriptor: Arc<MarketplaceDescriptor>) -> Self {
		Self { http_client, descriptor }
	}

	/// Performs the `client_credentials` grant and returns the issued token verbatim.
	///
	/// Fails with a configuration error before any outbound call when the client id or secret
	/// is missing.
	pub async fn fetch_access_token(&self, credentials: &Credentials) -> Result<AccessToken> {
		obs::observe(Stage::TokenExchange, self.exchange(credentials)).await
	}

	async fn exchange(&self, credentials: &Credentials) -> Result<AccessToken> {
		let (client_id, client_secret) = credentials.client_pair()?;
		let basic = STANDARD.encode(format!("{client_id}:{client_secret}"));
		let form =
			[("grant_type", GRANT_TYPE.to_owned()), ("scope", self.descriptor.scope.normalized())];
		let request =
			MarketplaceRequest::post_form(self.descriptor.endpoints.token.clone(), form)
				.header("Authorization", format!("Basic {basic}"));
		let response = self
			.http_client
			.execute(request)
			.await
			.map_err(|e| Error::transport(Stage::TokenExchange, e))?;

		if !response.is_success() {
			let body = response.body_text();

			tracing::error!(
				status = response.status,
				retry_after_secs = response.retry_after.map(|d| d.whole_seconds()),
				body = %body,
				"Token exchange was rejected."
			);

			return Err(UpstreamAuthError::Rejected {
				status: response.status,
				body,
				retry_after: response.retry_after,
			}
			.into());
		}

		let mut de = serde_json::Deserializer::from_slice(&response.body);
		let parsed: TokenResponse = serde_path_to_error::deserialize(&mut de).map_err(|source| {
			tracing::error!(
				status = response.status,
				body = %response.body_text(),
				"Token endpoint returned a malformed body."
			);

			UpstreamAuthError::MalformedBody { status: response.status, source }
		})?;
		let token = AccessToken::from(parsed);

		tracing::debug!(
			token_type = token.token_type.as_deref().unwrap_or("unknown"),
			expires_in = token.expires_in.map(|d| d.whole_seconds()),
			"Issued marketplace access token."
		);

		Ok(token)
	}
}
impl<C> Clone for TokenProvider<C>
where
	C: ?Sized + MarketplaceHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), descriptor: self.descriptor.clone() }
	}
}
impl<C> Debug for TokenProvider<C>
where
	C: ?Sized + MarketplaceHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("token_endpoint", &self.descriptor.endpoints.token)
			.finish()
	}
}
