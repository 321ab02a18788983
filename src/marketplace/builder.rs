// std
use std::net::IpAddr;
// self
use crate::{
	_prelude::*,
	auth::{MarketplaceId, ScopeSet},
	error::ConfigError,
	marketplace::{
		MarketplaceDescriptor, MarketplaceEndpoints, MarketplaceEnvironment, SellerScope,
	},
};

const TOKEN_PATH: &str = "/identity/v1/oauth2/token";
const SEARCH_PATH: &str = "/buy/browse/v1/item_summary/search";
const DEFAULT_MARKETPLACE: &str = "EBAY_US";

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum MarketplaceDescriptorError {
	/// Token endpoint is mandatory.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// Search endpoint is mandatory.
	#[error("Missing search endpoint.")]
	MissingSearchEndpoint,
	/// At least one scope must be requested.
	#[error("Descriptor must request at least one OAuth scope.")]
	NoScopes,
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Builder for [`MarketplaceDescriptor`] values.
#[derive(Debug, Default)]
pub struct MarketplaceDescriptorBuilder {
	/// OAuth token endpoint.
	pub token_endpoint: Option<Url>,
	/// Item search endpoint.
	pub search_endpoint: Option<Url>,
	/// Scopes requested on every exchange.
	pub scope: ScopeSet,
	/// Seller scoping style for searches.
	pub seller_scope: SellerScope,
	/// Optional marketplace region header value.
	pub marketplace_id: Option<MarketplaceId>,
}
impl MarketplaceDescriptorBuilder {
	/// Creates a builder with the catalog's default scopes and no endpoints.
	pub fn new() -> Self {
		Self { scope: ScopeSet::catalog_default(), ..Default::default() }
	}

	/// Creates a builder pointed at a hosted environment, `EBAY_US` region included.
	pub fn for_environment(environment: MarketplaceEnvironment) -> Result<Self, ConfigError> {
		Self::new().api_base(environment.api_base())?.marketplace_id(DEFAULT_MARKETPLACE)
	}

	/// Derives both endpoints from a base URL such as `https://api.ebay.com`.
	pub fn api_base(self, base: &str) -> Result<Self, ConfigError> {
		let token = join(base, TOKEN_PATH)?;
		let search = join(base, SEARCH_PATH)?;

		Ok(self.token_endpoint(token).search_endpoint(search))
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the search endpoint.
	pub fn search_endpoint(mut self, url: Url) -> Self {
		self.search_endpoint = Some(url);

		self
	}

	/// Overrides the requested scopes.
	pub fn scope(mut self, scope: ScopeSet) -> Self {
		self.scope = scope;

		self
	}

	/// Overrides the seller scoping style.
	pub fn seller_scope(mut self, seller_scope: SellerScope) -> Self {
		self.seller_scope = seller_scope;

		self
	}

	/// Sets the marketplace region; an empty value removes the header.
	pub fn marketplace_id(mut self, value: &str) -> Result<Self, ConfigError> {
		self.marketplace_id =
			if value.is_empty() { None } else { Some(MarketplaceId::new(value)?) };

		Ok(self)
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<MarketplaceDescriptor, MarketplaceDescriptorError> {
		let token = self.token_endpoint.ok_or(MarketplaceDescriptorError::MissingTokenEndpoint)?;
		let search =
			self.search_endpoint.ok_or(MarketplaceDescriptorError::MissingSearchEndpoint)?;
		let descriptor = MarketplaceDescriptor {
			endpoints: MarketplaceEndpoints { token, search },
			scope: self.scope,
			seller_scope: self.seller_scope,
			marketplace_id: self.marketplace_id,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl MarketplaceDescriptor {
	fn validate(&self) -> Result<(), MarketplaceDescriptorError> {
		if self.scope.is_empty() {
			return Err(MarketplaceDescriptorError::NoScopes);
		}

		validate_endpoint("token", &self.endpoints.token)?;
		validate_endpoint("search", &self.endpoints.search)?;

		Ok(())
	}
}

fn join(base: &str, path: &str) -> Result<Url, ConfigError> {
	let value = format!("{}{path}", base.trim_end_matches('/'));

	Url::parse(&value).map_err(|source| ConfigError::InvalidUrl { value, source })
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), MarketplaceDescriptorError> {
	if url.scheme() == "https" || is_loopback(url) {
		Ok(())
	} else {
		Err(MarketplaceDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host_str() {
		Some("localhost") => true,
		Some(host) => host
			.trim_start_matches('[')
			.trim_end_matches(']')
			.parse::<IpAddr>()
			.is_ok_and(|ip| ip.is_loopback()),
		None => false,
	}
}
