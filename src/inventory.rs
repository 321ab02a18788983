//! Seller-scoped item search against the marketplace Browse API.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, SellerId},
	catalog::{CatalogItem, SearchResponse},
	config,
	error::{UpstreamParseError, UpstreamSearchError},
	http::{MarketplaceHttpClient, MarketplaceRequest, ReqwestHttpClient},
	marketplace::{MARKETPLACE_ID_HEADER, MarketplaceDescriptor, RESULT_LIMIT, SEARCH_KEYWORD},
	obs::{self, Stage},
};

/// Fetches one page of a seller's listings and normalizes them.
pub struct InventoryAdapter<C = ReqwestHttpClient>
where
	C: ?Sized + MarketplaceHttpClient,
{
	http_client: Arc<C>,
	descriptor: Arc<MarketplaceDescriptor>,
}
impl<C> InventoryAdapter<C>
where
	C: ?Sized + MarketplaceHttpClient,
{
	/// Creates an adapter sharing the caller's transport and descriptor.
	pub fn new(http_client: Arc<C>, descriptor: Arc<MarketplaceDescriptor>) -> Self {
		Self { http_client, descriptor }
	}

	/// Searches the seller's listings for the catalog keyword.
	///
	/// At most [`RESULT_LIMIT`] records are requested and no further pages are fetched. A
	/// missing or invalid seller fails before any outbound call.
	pub async fn fetch_inventory(
		&self,
		seller: Option<&str>,
		token: &AccessToken,
	) -> Result<Vec<CatalogItem>> {
		obs::observe(Stage::InventorySearch, self.search(seller, token)).await
	}

	async fn search(&self, seller: Option<&str>, token: &AccessToken) -> Result<Vec<CatalogItem>> {
		let seller = config::require_seller(seller)?;
		let request = self.search_request(&seller, token);
		let response = self
			.http_client
			.execute(request)
			.await
			.map_err(|e| Error::transport(Stage::InventorySearch, e))?;

		if !response.is_success() {
			let body = response.body_text();

			tracing::error!(
				status = response.status,
				seller = %seller,
				retry_after_secs = response.retry_after.map(|d| d.whole_seconds()),
				body = %body,
				"Item search was rejected."
			);

			return Err(UpstreamSearchError {
				status: response.status,
				body,
				retry_after: response.retry_after,
			}
			.into());
		}

		let mut de = serde_json::Deserializer::from_slice(&response.body);
		let parsed: SearchResponse = serde_path_to_error::deserialize(&mut de).map_err(|source| {
			tracing::error!(
				status = response.status,
				path = %source.path(),
				"Item search returned an unexpected body."
			);

			UpstreamParseError { status: response.status, source }
		})?;
		let total = parsed.total;
		let items = parsed.into_catalog_items();

		tracing::info!(seller = %seller, fetched = items.len(), total, "Fetched seller inventory.");

		Ok(items)
	}

	fn search_request(&self, seller: &SellerId, token: &AccessToken) -> MarketplaceRequest {
		let mut url = self.descriptor.endpoints.search.clone();
		let (scope_key, scope_value) = self.descriptor.seller_scope.query_pair(seller.as_str());

		url.query_pairs_mut()
			.append_pair("q", SEARCH_KEYWORD)
			.append_pair(scope_key, &scope_value)
			.append_pair("limit", &RESULT_LIMIT.to_string());

		let request = MarketplaceRequest::get(url)
			.header("Authorization", token.authorization_header())
			.header("Content-Type", "application/json");

		match &self.descriptor.marketplace_id {
			Some(marketplace_id) => request.header(MARKETPLACE_ID_HEADER, marketplace_id.as_str()),
			None => request,
		}
	}
}
impl<C> Clone for InventoryAdapter<C>
where
	C: ?Sized + MarketplaceHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), descriptor: self.descriptor.clone() }
	}
}
impl<C> Debug for InventoryAdapter<C>
where
	C: ?Sized + MarketplaceHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("InventoryAdapter")
			.field("search_endpoint", &self.descriptor.endpoints.search)
			.field("seller_scope", &self.descriptor.seller_scope)
			.finish()
	}
}
