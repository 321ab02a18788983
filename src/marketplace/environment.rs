// self
use crate::{_prelude::*, error::ConfigError};

/// Hosted marketplace environments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarketplaceEnvironment {
	/// Live marketplace.
	#[default]
	Production,
	/// Developer sandbox.
	Sandbox,
}
impl MarketplaceEnvironment {
	/// Base URL shared by the identity and Browse APIs.
	pub const fn api_base(self) -> &'static str {
		match self {
			MarketplaceEnvironment::Production => "https://api.ebay.com",
			MarketplaceEnvironment::Sandbox => "https://api.sandbox.ebay.com",
		}
	}

	/// Returns a stable label for logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			MarketplaceEnvironment::Production => "production",
			MarketplaceEnvironment::Sandbox => "sandbox",
		}
	}
}
impl Display for MarketplaceEnvironment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for MarketplaceEnvironment {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"" | "production" | "prod" => Ok(Self::Production),
			"sandbox" => Ok(Self::Sandbox),
			_ => Err(ConfigError::InvalidValue {
				name: "EBAY_ENVIRONMENT",
				value: s.to_owned(),
				reason: "expected `production` or `sandbox`",
			}),
		}
	}
}

/// How the seller restriction is expressed on search requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SellerScope {
	/// `seller=<username>` query parameter.
	#[default]
	QueryParam,
	/// `filter=sellers:{<username>}` filter expression.
	Filter,
}
impl SellerScope {
	/// Query pair restricting results to `seller`.
	pub fn query_pair(self, seller: &str) -> (&'static str, String) {
		match self {
			SellerScope::QueryParam => ("seller", seller.to_owned()),
			SellerScope::Filter => ("filter", format!("sellers:{{{seller}}}")),
		}
	}
}
impl FromStr for SellerScope {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"" | "param" | "seller" => Ok(Self::QueryParam),
			"filter" => Ok(Self::Filter),
			_ => Err(ConfigError::InvalidValue {
				name: "EBAY_SELLER_SCOPE",
				value: s.to_owned(),
				reason: "expected `param` or `filter`",
			}),
		}
	}
}
