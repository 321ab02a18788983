//! Seller names and marketplace region codes, checked before they reach a request.

// self
use crate::_prelude::*;

const MAX_LEN: usize = 128;

/// Reason a seller name or marketplace code was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// Value is empty.
	#[error("{0} is empty.")]
	Empty(&'static str),
	/// Value contains whitespace and would break the query or header.
	#[error("{0} contains whitespace.")]
	Whitespace(&'static str),
	/// Value exceeds the accepted length.
	#[error("{0} is longer than {max} bytes.", max = MAX_LEN)]
	TooLong(&'static str),
	/// Marketplace codes are limited to ASCII letters, digits, and `_`.
	#[error("{0} must only contain ASCII letters, digits, or `_`.")]
	Charset(&'static str),
}

/// Username of the seller whose listings make up the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SellerId(String);
impl SellerId {
	const KIND: &'static str = "Seller id";

	/// Validates a seller username.
	pub fn new(value: &str) -> Result<Self, IdentifierError> {
		check_common(Self::KIND, value)?;

		Ok(Self(value.to_owned()))
	}

	/// Username as sent in the search query.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Display for SellerId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Region code sent in the marketplace header, e.g. `EBAY_US`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketplaceId(String);
impl MarketplaceId {
	const KIND: &'static str = "Marketplace id";

	/// Validates a region code so it is always a legal header value.
	pub fn new(value: &str) -> Result<Self, IdentifierError> {
		check_common(Self::KIND, value)?;

		if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
			return Err(IdentifierError::Charset(Self::KIND));
		}

		Ok(Self(value.to_owned()))
	}

	/// Code as sent in the header.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

fn check_common(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	if value.is_empty() {
		Err(IdentifierError::Empty(kind))
	} else if value.chars().any(char::is_whitespace) {
		Err(IdentifierError::Whitespace(kind))
	} else if value.len() > MAX_LEN {
		Err(IdentifierError::TooLong(kind))
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn seller_names_reject_blanks_and_whitespace() {
		assert_eq!(SellerId::new(""), Err(IdentifierError::Empty("Seller id")));
		assert_eq!(SellerId::new("shop x"), Err(IdentifierError::Whitespace("Seller id")));
		assert!(SellerId::new("shop\u{00A0}x").is_err(), "Unicode whitespace counts.");
		assert_eq!(SellerId::new(&"a".repeat(MAX_LEN + 1)), Err(IdentifierError::TooLong("Seller id")));

		let seller = SellerId::new("wf.caps-2").expect("Punctuation is allowed in usernames.");

		assert_eq!(seller.as_str(), "wf.caps-2");
		assert_eq!(seller.to_string(), "wf.caps-2");
	}

	#[test]
	fn marketplace_codes_are_header_safe() {
		assert_eq!(
			MarketplaceId::new("EBAY_US").expect("Region code should be valid.").as_str(),
			"EBAY_US"
		);
		assert_eq!(MarketplaceId::new("EBAY-US"), Err(IdentifierError::Charset("Marketplace id")));
		assert_eq!(MarketplaceId::new("EBAY\r\nX"), Err(IdentifierError::Whitespace("Marketplace id")));
	}
}
