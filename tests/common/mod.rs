//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
// self
use storefront_catalog::{
	config::{Credentials, StorefrontConfig},
	http::ReqwestHttpClient,
	marketplace::MarketplaceDescriptor,
	service::CatalogService,
};

pub const TOKEN_PATH: &str = "/identity/v1/oauth2/token";
pub const SEARCH_PATH: &str = "/buy/browse/v1/item_summary/search";
pub const TOKEN_BODY: &str =
	"{\"access_token\":\"v^1.1#i^1#token-123\",\"expires_in\":7200,\"token_type\":\"Application Access Token\"}";
pub const BEARER: &str = "Bearer v^1.1#i^1#token-123";
/// `base64("app-id:app-secret")`.
pub const BASIC: &str = "Basic YXBwLWlkOmFwcC1zZWNyZXQ=";

pub fn descriptor(server: &MockServer) -> MarketplaceDescriptor {
	MarketplaceDescriptor::builder()
		.api_base(&server.base_url())
		.expect("Mock server base URL should parse.")
		.marketplace_id("EBAY_US")
		.expect("Marketplace id should be valid.")
		.build()
		.expect("Loopback descriptor should build.")
}

pub fn credentials() -> Credentials {
	Credentials::new(Some("app-id"), Some("app-secret"), Some("shopx"))
}

pub fn http_client() -> Arc<ReqwestHttpClient> {
	Arc::new(ReqwestHttpClient::default())
}

pub fn service(server: &MockServer, credentials: Credentials) -> Arc<CatalogService> {
	Arc::new(CatalogService::new(
		http_client(),
		descriptor(server),
		credentials,
		StorefrontConfig::default(),
	))
}
