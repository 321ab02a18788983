//! Catalog-level error types shared by the token provider, inventory adapter, and server.

// self
use crate::{_prelude::*, obs::Stage};

/// Catalog-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical catalog error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem (missing credential, invalid value).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token exchange with the marketplace identity endpoint failed.
	#[error(transparent)]
	UpstreamAuth(#[from] UpstreamAuthError),
	/// Marketplace search endpoint answered with a non-success status.
	#[error(transparent)]
	UpstreamSearch(#[from] UpstreamSearchError),
	/// Marketplace search endpoint answered with a body of unexpected shape.
	#[error(transparent)]
	UpstreamParse(#[from] UpstreamParseError),
	/// Network failure while talking to the marketplace.
	#[error("Network failure during {stage}.")]
	Transport {
		/// Stage that issued the failing call.
		stage: Stage,
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// Listener could not be bound or the HTTP server stopped with an I/O failure.
	#[error("HTTP server failed.")]
	Server(#[from] std::io::Error),
}
impl Error {
	/// Wraps a transport failure raised while executing `stage`.
	pub fn transport(stage: Stage, source: TransportError) -> Self {
		Self::Transport { stage, source }
	}

	/// Returns `true` for local configuration problems.
	pub fn is_config(&self) -> bool {
		matches!(self, Self::Config(_))
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required credential or identifier was absent or empty.
	#[error("Missing required configuration value: {name}.")]
	MissingCredential {
		/// Environment-style name of the missing value.
		name: &'static str,
	},
	/// An identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Marketplace descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::marketplace::MarketplaceDescriptorError),
	/// A configured URL could not be parsed.
	#[error("Configured URL `{value}` is invalid.")]
	InvalidUrl {
		/// Raw configured value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A configuration value could not be interpreted.
	#[error("Configuration value {name}=`{value}` is invalid: {reason}.")]
	InvalidValue {
		/// Environment-style name of the value.
		name: &'static str,
		/// Raw configured value.
		value: String,
		/// Human readable explanation.
		reason: &'static str,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Failures raised by the client-credentials token exchange.
#[derive(Debug, ThisError)]
pub enum UpstreamAuthError {
	/// Token endpoint returned a non-success status.
	#[error("Token endpoint rejected the exchange with status {status}.")]
	Rejected {
		/// HTTP status code.
		status: u16,
		/// Raw response body kept for server-side diagnostics.
		body: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Token endpoint returned a success status with an unusable body.
	#[error("Token endpoint returned a malformed body.")]
	MalformedBody {
		/// HTTP status code.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
}

/// Non-success answer from the marketplace search endpoint.
#[derive(Debug, ThisError)]
#[error("Search endpoint failed with status {status}.")]
pub struct UpstreamSearchError {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: String,
	/// Retry-After hint from upstream, if supplied.
	pub retry_after: Option<Duration>,
}

/// Search endpoint body that does not match the expected item-summary shape.
#[derive(Debug, ThisError)]
#[error("Search endpoint returned an unexpected body at `{path}`.", path = .source.path())]
pub struct UpstreamParseError {
	/// HTTP status code.
	pub status: u16,
	/// Structured parsing failure.
	#[source]
	pub source: JsonPathError,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the marketplace.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the marketplace.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
