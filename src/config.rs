//! Process configuration, built once at start and shared by reference.
//!
//! Credentials are allowed to be absent here: a missing client id, secret, or seller only
//! becomes an error when a request needs it, so the server still starts and answers with a
//! configuration error instead of refusing to boot.

// std
use std::{net::SocketAddr, path::PathBuf, time::Duration as StdDuration};
// self
use crate::{
	_prelude::*,
	auth::{SellerId, TokenSecret},
	error::ConfigError,
	marketplace::{
		MarketplaceDescriptor, MarketplaceDescriptorBuilder, MarketplaceEnvironment, SellerScope,
	},
	obs::LogFormat,
};

/// Client id variable name.
pub const CLIENT_ID_VAR: &str = "EBAY_CLIENT_ID";
/// Client secret variable name.
pub const CLIENT_SECRET_VAR: &str = "EBAY_CLIENT_SECRET";
/// Seller username variable name.
pub const SELLER_ID_VAR: &str = "EBAY_SELLER_ID";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TITLE: &str = "Hat Catalog";
const DEFAULT_TAGLINE: &str = "Current hat inventory, straight from my marketplace listings.";

/// Application credentials plus the seller whose listings are shown.
///
/// Empty values are treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
	client_id: Option<String>,
	client_secret: Option<TokenSecret>,
	seller: Option<String>,
}
impl Credentials {
	/// Builds credentials from optional raw values.
	pub fn new(client_id: Option<&str>, client_secret: Option<&str>, seller: Option<&str>) -> Self {
		Self {
			client_id: non_empty(client_id).map(str::to_owned),
			client_secret: non_empty(client_secret).map(TokenSecret::new),
			seller: non_empty(seller).map(str::to_owned),
		}
	}

	/// Client id and secret, or the name of the first missing one.
	pub fn client_pair(&self) -> Result<(&str, &str), ConfigError> {
		let client_id =
			self.client_id.as_deref().ok_or(ConfigError::MissingCredential { name: CLIENT_ID_VAR })?;
		let client_secret = self
			.client_secret
			.as_ref()
			.map(TokenSecret::expose)
			.ok_or(ConfigError::MissingCredential { name: CLIENT_SECRET_VAR })?;

		Ok((client_id, client_secret))
	}

	/// Seller username, when configured.
	pub fn seller(&self) -> Option<&str> {
		self.seller.as_deref()
	}

	/// Validated seller, or a configuration error naming `EBAY_SELLER_ID`.
	pub fn seller_id(&self) -> Result<SellerId, ConfigError> {
		require_seller(self.seller())
	}
}

/// Outcome of looking for a `.env` file, reported once logging is up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EnvFileStatus {
	/// Configuration did not come from the process environment.
	#[default]
	Skipped,
	/// No `.env` file exists.
	Missing,
	/// Variables were loaded from this file.
	Loaded(PathBuf),
	/// A `.env` file exists but could not be read or parsed.
	Unreadable(String),
}
impl EnvFileStatus {
	fn from_dotenv(result: Result<PathBuf, dotenvy::Error>) -> Self {
		match result {
			Ok(path) => Self::Loaded(path),
			Err(e) if e.not_found() => Self::Missing,
			Err(e) => Self::Unreadable(e.to_string()),
		}
	}
}

/// Page header text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorefrontConfig {
	/// Page title and heading.
	pub title: String,
	/// Line shown under the heading.
	pub tagline: String,
}
impl Default for StorefrontConfig {
	fn default() -> Self {
		Self { title: DEFAULT_TITLE.into(), tagline: DEFAULT_TAGLINE.into() }
	}
}

/// Complete process configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
	/// Marketplace credentials and seller.
	pub credentials: Credentials,
	/// Endpoints, scopes, and search scoping.
	pub descriptor: MarketplaceDescriptor,
	/// Address the HTTP server binds to.
	pub listen_addr: SocketAddr,
	/// Timeout applied to each outbound call; `None` waits indefinitely.
	pub http_timeout: Option<StdDuration>,
	/// Page header text.
	pub storefront: StorefrontConfig,
	/// Log output format.
	pub log_format: LogFormat,
	/// Where the environment came from.
	pub env_file: EnvFileStatus,
}
impl AppConfig {
	/// Loads `.env` when present, then reads the process environment.
	///
	/// Nothing is logged here; call [`AppConfig::log_summary`] after installing the subscriber.
	pub fn from_env() -> Result<Self> {
		let env_file = EnvFileStatus::from_dotenv(dotenvy::dotenv());
		let config = Self::from_lookup(|name| std::env::var(name).ok())?;

		Ok(Self { env_file, ..config })
	}

	/// Reports how the configuration was assembled.
	pub fn log_summary(&self) {
		match &self.env_file {
			EnvFileStatus::Loaded(path) => tracing::debug!(path = %path.display(), "Loaded .env file."),
			EnvFileStatus::Unreadable(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file."),
			EnvFileStatus::Skipped | EnvFileStatus::Missing => {},
		}

		tracing::info!(
			listen_addr = %self.listen_addr,
			search_endpoint = %self.descriptor.endpoints.search,
			seller_scope = ?self.descriptor.seller_scope,
			seller = self.credentials.seller().unwrap_or("<unset>"),
			"Configuration loaded."
		);
	}

	/// Builds the configuration from an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| lookup(name).map(|value| value.trim().to_owned());
		let credentials = Credentials::new(
			var(CLIENT_ID_VAR).as_deref(),
			var(CLIENT_SECRET_VAR).as_deref(),
			var(SELLER_ID_VAR).as_deref(),
		);
		let environment = var("EBAY_ENVIRONMENT")
			.map(|value| MarketplaceEnvironment::from_str(&value))
			.transpose()?
			.unwrap_or_default();
		let seller_scope = var("EBAY_SELLER_SCOPE")
			.map(|value| SellerScope::from_str(&value))
			.transpose()?
			.unwrap_or_default();
		let mut builder =
			MarketplaceDescriptorBuilder::for_environment(environment)?.seller_scope(seller_scope);

		if let Some(marketplace_id) = var("EBAY_MARKETPLACE_ID") {
			builder = builder.marketplace_id(&marketplace_id)?;
		}
		if let Some(base) = var("EBAY_API_BASE").filter(|value| !value.is_empty()) {
			builder = builder.api_base(&base)?;
		}

		let descriptor = builder.build().map_err(ConfigError::from)?;
		let listen_addr = var("CATALOG_LISTEN_ADDR")
			.filter(|value| !value.is_empty())
			.unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
		let listen_addr = listen_addr.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidValue {
			name: "CATALOG_LISTEN_ADDR",
			value: listen_addr.clone(),
			reason: "expected a socket address such as 127.0.0.1:3000",
		})?;
		let http_timeout = match var("CATALOG_HTTP_TIMEOUT_SECS").filter(|value| !value.is_empty()) {
			Some(value) => Some(parse_timeout(&value)?),
			None => None,
		};
		let defaults = StorefrontConfig::default();
		let storefront = StorefrontConfig {
			title: var("CATALOG_TITLE").filter(|v| !v.is_empty()).unwrap_or(defaults.title),
			tagline: var("CATALOG_TAGLINE").filter(|v| !v.is_empty()).unwrap_or(defaults.tagline),
		};
		let log_format =
			var("LOG_FORMAT").map(|value| LogFormat::from_str(&value)).transpose()?.unwrap_or_default();

		Ok(Self {
			credentials,
			descriptor,
			listen_addr,
			http_timeout,
			storefront,
			log_format,
			env_file: EnvFileStatus::Skipped,
		})
	}
}

pub(crate) fn require_seller(seller: Option<&str>) -> Result<SellerId, ConfigError> {
	let seller = non_empty(seller).ok_or(ConfigError::MissingCredential { name: SELLER_ID_VAR })?;

	Ok(SellerId::new(seller)?)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.is_empty())
}

fn parse_timeout(value: &str) -> Result<StdDuration, ConfigError> {
	match value.parse::<u64>() {
		Ok(secs) if secs > 0 => Ok(StdDuration::from_secs(secs)),
		_ => Err(ConfigError::InvalidValue {
			name: "CATALOG_HTTP_TIMEOUT_SECS",
			value: value.to_owned(),
			reason: "expected a positive number of seconds",
		}),
	}
}
