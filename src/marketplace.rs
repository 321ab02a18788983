//! Marketplace descriptor: where the identity and search endpoints live and how searches
//! are scoped.
//!
//! Descriptors are immutable once built and shared by every request; the builder validates
//! endpoints up front so a misconfigured deployment fails at start instead of per request.

/// Builder API for assembling marketplace descriptors.
pub mod builder;
/// Hosted environments and search scoping options.
pub mod environment;

pub use builder::*;
pub use environment::*;

// self
use crate::{
	_prelude::*,
	auth::{MarketplaceId, ScopeSet},
	error::ConfigError,
};

/// Keyword every catalog search uses.
pub const SEARCH_KEYWORD: &str = "hat";
/// Maximum number of listings fetched per catalog load; no further pages are requested.
pub const RESULT_LIMIT: u32 = 100;
/// Header carrying the marketplace region on search requests.
pub const MARKETPLACE_ID_HEADER: &str = "X-EBAY-C-MARKETPLACE-ID";

/// Endpoint set declared by a marketplace descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketplaceEndpoints {
	/// OAuth token endpoint for the client-credentials exchange.
	pub token: Url,
	/// Item summary search endpoint.
	pub search: Url,
}

/// Immutable marketplace descriptor consumed by the token provider and inventory adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketplaceDescriptor {
	/// Endpoint definitions.
	pub endpoints: MarketplaceEndpoints,
	/// Fixed scopes requested on every token exchange.
	pub scope: ScopeSet,
	/// How the seller restriction is expressed on search requests.
	pub seller_scope: SellerScope,
	/// Optional marketplace region sent with searches.
	pub marketplace_id: Option<MarketplaceId>,
}
impl MarketplaceDescriptor {
	/// Creates a new builder with no endpoints configured.
	pub fn builder() -> MarketplaceDescriptorBuilder {
		MarketplaceDescriptorBuilder::new()
	}

	/// Descriptor for a hosted environment with the default scopes and `EBAY_US` region.
	pub fn for_environment(environment: MarketplaceEnvironment) -> Result<Self> {
		let descriptor = MarketplaceDescriptorBuilder::for_environment(environment)?
			.build()
			.map_err(ConfigError::from)?;

		Ok(descriptor)
	}
}
