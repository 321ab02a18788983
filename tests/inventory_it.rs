mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use storefront_catalog::{
	auth::AccessToken,
	error::{Error, UpstreamSearchError},
	inventory::InventoryAdapter,
};

fn adapter(server: &MockServer) -> InventoryAdapter {
	InventoryAdapter::new(http_client(), Arc::new(descriptor(server)))
}

fn token() -> AccessToken {
	AccessToken::bearer("v^1.1#i^1#token-123")
}

#[tokio::test]
async fn search_sends_fixed_query_and_headers() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(SEARCH_PATH)
				.query_param("q", "hat")
				.query_param("seller", "shopx")
				.query_param("limit", "100")
				.header("authorization", BEARER)
				.header("x-ebay-c-marketplace-id", "EBAY_US");
			then.status(200).header("content-type", "application/json").body(
				"{\"total\":2,\"itemSummaries\":[\
				 {\"itemId\":\"v1|1|0\",\"title\":\"Fitted cap\",\
				 \"price\":{\"value\":\"19.99\",\"currency\":\"USD\"},\
				 \"image\":{\"imageUrl\":\"https://i.ebayimg.com/1.jpg\"},\"quantity\":2},\
				 {\"itemId\":\"v1|2|0\",\"estimatedAvailableQuantity\":5}]}",
			);
		})
		.await;
	let items = adapter(&server)
		.fetch_inventory(Some("shopx"), &token())
		.await
		.expect("Search should succeed.");

	assert_eq!(items.len(), 2);
	assert_eq!(items[0].title.as_deref(), Some("Fitted cap"));
	assert_eq!(items[0].price_label().as_deref(), Some("USD 19.99"));
	assert_eq!(items[0].quantity, Some(2));
	assert_eq!(items[1].image, None);
	assert_eq!(items[1].quantity, Some(5));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn missing_result_set_is_empty() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(SEARCH_PATH);
			then.status(200).body("{\"total\":0}");
		})
		.await;
	let items = adapter(&server)
		.fetch_inventory(Some("shopx"), &token())
		.await
		.expect("Empty search should succeed.");

	assert!(items.is_empty());

	mock.assert_async().await;
}

#[tokio::test]
async fn upstream_failure_keeps_raw_body() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(SEARCH_PATH);
			then.status(500).body("{\"errors\":[{\"message\":\"Internal error\"}]}");
		})
		.await;
	let err = adapter(&server)
		.fetch_inventory(Some("shopx"), &token())
		.await
		.expect_err("Rejected search must fail.");

	assert!(matches!(
		&err,
		Error::UpstreamSearch(UpstreamSearchError { status: 500, body, .. })
			if body == "{\"errors\":[{\"message\":\"Internal error\"}]}"
	));

	mock.assert_async().await;
}

#[tokio::test]
async fn missing_seller_never_reaches_the_endpoint() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(SEARCH_PATH);
			then.status(200).body("{}");
		})
		.await;
	let err = adapter(&server)
		.fetch_inventory(None, &token())
		.await
		.expect_err("Missing seller must fail.");

	assert!(err.is_config());

	mock.assert_calls_async(0).await;
}
