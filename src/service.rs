//! Catalog service: the token + search chain run for every inbound request.

// self
use crate::{
	_prelude::*,
	catalog::Catalog,
	config::{AppConfig, Credentials, StorefrontConfig},
	http::{MarketplaceHttpClient, ReqwestHttpClient},
	inventory::InventoryAdapter,
	marketplace::MarketplaceDescriptor,
	obs::{self, Stage},
	token::TokenProvider,
};

/// Loads the seller's catalog on demand.
///
/// Holds only immutable configuration and a shared transport, so one instance serves every
/// concurrent request without coordination.
pub struct CatalogService<C = ReqwestHttpClient>
where
	C: ?Sized + MarketplaceHttpClient,
{
	credentials: Arc<Credentials>,
	storefront: Arc<StorefrontConfig>,
	tokens: TokenProvider<C>,
	inventory: InventoryAdapter<C>,
}
impl CatalogService {
	/// Builds a service backed by reqwest, honoring the configured timeout.
	pub fn from_config(config: &AppConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(config.http_timeout)?;

		Ok(Self::new(
			Arc::new(http_client),
			config.descriptor.clone(),
			config.credentials.clone(),
			config.storefront.clone(),
		))
	}
}
impl<C> CatalogService<C>
where
	C: ?Sized + MarketplaceHttpClient,
{
	/// Creates a service over an arbitrary transport.
	pub fn new(
		http_client: Arc<C>,
		descriptor: MarketplaceDescriptor,
		credentials: Credentials,
		storefront: StorefrontConfig,
	) -> Self {
		let descriptor = Arc::new(descriptor);

		Self {
			credentials: Arc::new(credentials),
			storefront: Arc::new(storefront),
			tokens: TokenProvider::new(http_client.clone(), descriptor.clone()),
			inventory: InventoryAdapter::new(http_client, descriptor),
		}
	}

	/// Page header text.
	pub fn storefront(&self) -> &StorefrontConfig {
		&self.storefront
	}

	/// Exchanges credentials for a token, then fetches and normalizes the seller's items.
	///
	/// Every required credential, the seller included, is checked before the first outbound
	/// call. The search never starts when the exchange fails; any failure aborts the whole load.
	pub async fn load_catalog(&self) -> Result<Catalog> {
		obs::observe(Stage::CatalogLoad, self.load()).await
	}

	async fn load(&self) -> Result<Catalog> {
		let seller = self.credentials.seller_id()?;
		let token = self.tokens.fetch_access_token(&self.credentials).await?;
		let items = self.inventory.fetch_inventory(Some(seller.as_str()), &token).await?;

		Ok(Catalog::new(items))
	}
}
impl<C> Clone for CatalogService<C>
where
	C: ?Sized + MarketplaceHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			credentials: self.credentials.clone(),
			storefront: self.storefront.clone(),
			tokens: self.tokens.clone(),
			inventory: self.inventory.clone(),
		}
	}
}
impl<C> Debug for CatalogService<C>
where
	C: ?Sized + MarketplaceHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CatalogService")
			.field("seller", &self.credentials.seller())
			.field("tokens", &self.tokens)
			.field("inventory", &self.inventory)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		error::{ConfigError, UpstreamAuthError, UpstreamSearchError},
		http::{HttpMethod, MarketplaceResponse, fake::RecordingHttpClient},
		marketplace::MarketplaceEnvironment,
	};

	const TOKEN_BODY: &str = "{\"access_token\":\"token-123\",\"expires_in\":7200}";

	fn service(
		client: Arc<RecordingHttpClient>,
		credentials: Credentials,
	) -> CatalogService<RecordingHttpClient> {
		let descriptor = MarketplaceDescriptor::for_environment(MarketplaceEnvironment::Production)
			.expect("Production descriptor should build.");

		CatalogService::new(client, descriptor, credentials, StorefrontConfig::default())
	}

	fn credentials() -> Credentials {
		Credentials::new(Some("app-id"), Some("app-secret"), Some("shopx"))
	}

	#[tokio::test]
	async fn load_chains_exchange_then_search() {
		let client = Arc::new(RecordingHttpClient::replying([
			MarketplaceResponse::new(200, TOKEN_BODY),
			MarketplaceResponse::new(
				200,
				"{\"itemSummaries\":[{\"itemId\":\"1\",\"price\":{\"value\":\"10\",\"currency\":\"USD\"},\
				 \"image\":{\"imageUrl\":\"u\"},\"quantity\":3},{\"itemId\":\"2\",\
				 \"thumbnailImages\":[{\"imageUrl\":\"t\"}]}]}",
			),
		]));
		let catalog = service(client.clone(), credentials())
			.load_catalog()
			.await
			.expect("Catalog should load.");
		let requests = client.requests();

		assert_eq!(catalog.items.len(), 2);
		assert_eq!(catalog.items[0].price_label().as_deref(), Some("USD 10"));
		assert_eq!(catalog.items[1].image.as_deref(), Some("t"));
		assert_eq!(requests.len(), 2);
		assert_eq!(requests[0].method, HttpMethod::Post);
		assert_eq!(requests[1].method, HttpMethod::Get);
		assert_eq!(requests[1].header_value("authorization"), Some("Bearer token-123"));
	}

	#[tokio::test]
	async fn failed_exchange_skips_search() {
		let client = Arc::new(RecordingHttpClient::replying([
			MarketplaceResponse::new(401, "{\"error\":\"invalid_client\"}"),
			MarketplaceResponse::new(200, "{}"),
		]));
		let err = service(client.clone(), credentials())
			.load_catalog()
			.await
			.expect_err("Rejected exchange must abort the load.");

		assert!(matches!(err, Error::UpstreamAuth(UpstreamAuthError::Rejected { .. })));
		assert_eq!(client.requests().len(), 1);
	}

	#[tokio::test]
	async fn search_failure_surfaces_after_exchange() {
		let client = Arc::new(RecordingHttpClient::replying([
			MarketplaceResponse::new(200, TOKEN_BODY),
			MarketplaceResponse::new(503, "unavailable"),
		]));
		let err = service(client, credentials())
			.load_catalog()
			.await
			.expect_err("Rejected search must fail the load.");

		assert!(matches!(err, Error::UpstreamSearch(UpstreamSearchError { status: 503, .. })));
	}

	#[tokio::test]
	async fn missing_credentials_issue_no_calls() {
		let client = Arc::new(RecordingHttpClient::default());
		let err = service(client.clone(), Credentials::default())
			.load_catalog()
			.await
			.expect_err("Missing credentials must fail.");

		assert!(matches!(err, Error::Config(ConfigError::MissingCredential { .. })));
		assert!(client.requests().is_empty());
	}

	#[tokio::test]
	async fn missing_seller_skips_token_exchange() {
		for seller in [None, Some("shop x")] {
			let client =
				Arc::new(RecordingHttpClient::replying([MarketplaceResponse::new(200, TOKEN_BODY)]));
			let err = service(client.clone(), Credentials::new(Some("app-id"), Some("app-secret"), seller))
				.load_catalog()
				.await
				.expect_err("Seller is required before any call.");

			assert!(err.is_config(), "Unexpected error: {err:?}");
			assert!(client.requests().is_empty(), "No outbound call may be issued.");
		}
	}

	#[tokio::test]
	async fn concurrent_loads_are_independent() {
		// Valid as both a token and a search body, so call interleaving does not matter.
		let body = "{\"access_token\":\"token-123\",\"itemSummaries\":[]}";
		let client = Arc::new(RecordingHttpClient::replying(
			(0..4).map(|_| MarketplaceResponse::new(200, body)),
		));
		let service = service(client.clone(), credentials());
		let (a, b) = tokio::join!(service.load_catalog(), service.load_catalog());

		assert!(a.expect("First load should succeed.").is_empty());
		assert!(b.expect("Second load should succeed.").is_empty());
		assert_eq!(client.requests().len(), 4);
	}
}
