//! Fixed OAuth scopes requested by the client-credentials exchange.

// self
use crate::_prelude::*;

/// OAuth scope granting general public-data access.
pub const GENERAL_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";
/// OAuth scope granting read access to the Browse API.
pub const BROWSE_READONLY_SCOPE: &str =
	"https://api.ebay.com/oauth/api_scope/buy.browse.readonly";

/// Scopes sent as the `scope` form field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeSet {
	scopes: Arc<[&'static str]>,
}
impl ScopeSet {
	/// General plus browse-read scopes requested by the catalog.
	pub fn catalog_default() -> Self {
		Self { scopes: Arc::from([GENERAL_SCOPE, BROWSE_READONLY_SCOPE]) }
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.scopes.is_empty()
	}

	/// Space-delimited form value.
	pub fn normalized(&self) -> String {
		self.scopes.join(" ")
	}
}
impl Display for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.normalized())
	}
}
