//! Raw marketplace item records and their normalized, display-ready form.
//!
//! Upstream records are sparse: any attribute may be missing or `null`. [`RawItem`] models
//! every attribute as optional and [`CatalogItem::from_raw`] applies one defaulting rule per
//! field. No record is dropped for missing or mistyped data.

// crates.io
use serde::Deserializer;
use serde_json::Value;
// self
use crate::_prelude::*;

/// Search response body returned by the item summary endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	/// Matching item records; absent when nothing matched.
	#[serde(default)]
	pub item_summaries: Option<Vec<RawItem>>,
	/// Total number of matches reported upstream, which may exceed the fetched page.
	#[serde(default)]
	pub total: Option<u64>,
}
impl SearchResponse {
	/// Normalizes every record; an absent result set yields an empty list.
	pub fn into_catalog_items(self) -> Vec<CatalogItem> {
		self.item_summaries.unwrap_or_default().into_iter().map(CatalogItem::from_raw).collect()
	}
}

/// Marketplace item record as delivered by the search endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
	/// Marketplace item identifier.
	#[serde(default)]
	pub item_id: Option<String>,
	/// Listing title.
	#[serde(default)]
	pub title: Option<String>,
	/// Listing price.
	#[serde(default)]
	pub price: Option<RawPrice>,
	/// Primary image.
	#[serde(default)]
	pub image: Option<RawImage>,
	/// Thumbnail images, first one used as a fallback.
	#[serde(default)]
	pub thumbnail_images: Option<Vec<RawImage>>,
	/// Listing page on the marketplace.
	#[serde(default)]
	pub item_web_url: Option<String>,
	/// Item condition label.
	#[serde(default)]
	pub condition: Option<String>,
	/// Exact available quantity.
	#[serde(default, deserialize_with = "lenient_count")]
	pub quantity: Option<u64>,
	/// Estimated available quantity, used when no exact figure is given.
	#[serde(default, deserialize_with = "lenient_count")]
	pub estimated_available_quantity: Option<u64>,
	/// Listing seller.
	#[serde(default)]
	pub seller: Option<RawSeller>,
}

/// Price sub-record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawPrice {
	/// Decimal amount as text, e.g. `"24.99"`. Bare numbers are kept in their JSON form.
	#[serde(default, deserialize_with = "lenient_text")]
	pub value: Option<String>,
	/// ISO 4217 currency code.
	#[serde(default)]
	pub currency: Option<String>,
}

/// Image sub-record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
	/// Image location.
	#[serde(default)]
	pub image_url: Option<String>,
}

/// Seller sub-record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawSeller {
	/// Seller username.
	#[serde(default)]
	pub username: Option<String>,
}

// Accepts a string or a number; anything else reads as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(text) => Some(text),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	})
}

// Accepts a non-negative whole number, as JSON number or numeric string; anything else reads
// as absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::Number(number) => number.as_u64().or_else(|| {
			number
				.as_f64()
				.filter(|n| *n >= 0. && n.fract() == 0. && *n <= u64::MAX as f64)
				.map(|n| n as u64)
		}),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	})
}

/// Normalized, display-ready catalog entry.
///
/// `image` and `quantity` are always serialized (as `null` when unknown); the other optional
/// attributes are omitted from JSON when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
	/// Marketplace item identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Listing title.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Price amount as text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub price: Option<String>,
	/// Currency code of `price`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub currency: Option<String>,
	/// Image URL.
	pub image: Option<String>,
	/// Listing page on the marketplace.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// Item condition label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub condition: Option<String>,
	/// Available quantity.
	pub quantity: Option<u64>,
	/// Seller username.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub seller: Option<String>,
}
impl CatalogItem {
	/// Applies the per-field defaulting rules to a raw record.
	pub fn from_raw(raw: RawItem) -> Self {
		let (price, currency) = match raw.price {
			Some(RawPrice { value, currency }) => (value, currency),
			None => (None, None),
		};
		let image = raw.image.and_then(|image| image.image_url).or_else(|| {
			raw.thumbnail_images
				.and_then(|thumbnails| thumbnails.into_iter().next())
				.and_then(|thumbnail| thumbnail.image_url)
		});

		Self {
			id: raw.item_id,
			title: raw.title,
			price,
			currency,
			image,
			url: raw.item_web_url,
			condition: raw.condition,
			quantity: raw.quantity.or(raw.estimated_available_quantity),
			seller: raw.seller.and_then(|seller| seller.username),
		}
	}

	/// Display label for the price, e.g. `USD 24.99`; `None` when the price is unknown.
	pub fn price_label(&self) -> Option<String> {
		let price = self.price.as_deref().filter(|value| !value.is_empty())?;

		Some(match self.currency.as_deref() {
			Some(currency) if !currency.is_empty() => format!("{currency} {price}"),
			_ => format!("${price}"),
		})
	}
}
impl From<RawItem> for CatalogItem {
	fn from(raw: RawItem) -> Self {
		Self::from_raw(raw)
	}
}

/// Read model handed to presentation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
	/// Normalized items, in upstream order.
	pub items: Vec<CatalogItem>,
}
impl Catalog {
	/// Wraps normalized items.
	pub fn new(items: Vec<CatalogItem>) -> Self {
		Self { items }
	}

	/// Returns `true` when there is nothing to show.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}
