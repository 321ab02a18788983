//! HTTP surface: JSON catalog API, server-rendered page, and liveness check.

// crates.io
use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{Html, IntoResponse, Response},
	routing::get,
};
use tokio::net::TcpListener;
// self
use crate::{
	_prelude::*,
	catalog::Catalog,
	config::AppConfig,
	error::UpstreamSearchError,
	http::MarketplaceHttpClient,
	page,
	service::CatalogService,
};

/// JSON body returned for every failed catalog request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Short, client-safe description.
	pub error: String,
	/// Upstream detail, only for failures where it is safe to forward.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub details: Option<String>,
}

/// Catalog error converted at the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub Error);
impl ApiError {
	/// Client-facing body for the wrapped error.
	pub fn body(&self) -> ErrorBody {
		let (error, details) = match &self.0 {
			Error::Config(e) => (e.to_string(), None),
			Error::UpstreamAuth(_) => ("Marketplace authentication failed".into(), None),
			Error::UpstreamSearch(UpstreamSearchError { body, .. }) =>
				("Marketplace search failed".into(), Some(body.clone())),
			Error::UpstreamParse(e) =>
				("Marketplace returned an unexpected response".into(), Some(e.to_string())),
			Error::Transport { .. } => ("Marketplace is unreachable".into(), None),
			Error::Server(_) => ("Internal server error".into(), None),
		};

		ErrorBody { error, details }
	}
}
impl From<Error> for ApiError {
	fn from(e: Error) -> Self {
		Self(e)
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(StatusCode::INTERNAL_SERVER_ERROR, Json(self.body())).into_response()
	}
}

/// Builds the router over a shared catalog service.
pub fn router<C>(service: Arc<CatalogService<C>>) -> Router
where
	C: ?Sized + MarketplaceHttpClient,
{
	Router::new()
		.route("/", get(catalog_page::<C>))
		.route("/api/catalog", get(catalog_json::<C>))
		.route("/healthz", get(|| async { "ok" }))
		.with_state(service)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: AppConfig) -> Result<()> {
	let service = Arc::new(CatalogService::from_config(&config)?);
	let listener = TcpListener::bind(config.listen_addr).await?;

	tracing::info!(addr = %listener.local_addr()?, "Storefront catalog listening.");

	axum::serve(listener, router(service)).with_graceful_shutdown(shutdown_signal()).await?;

	tracing::info!("Storefront catalog stopped.");

	Ok(())
}

async fn catalog_json<C>(
	State(service): State<Arc<CatalogService<C>>>,
) -> Result<Json<Catalog>, ApiError>
where
	C: ?Sized + MarketplaceHttpClient,
{
	match service.load_catalog().await {
		Ok(catalog) => Ok(Json(catalog)),
		Err(e) => {
			tracing::error!(error = %e, "Catalog request failed.");

			Err(e.into())
		},
	}
}

async fn catalog_page<C>(State(service): State<Arc<CatalogService<C>>>) -> Html<String>
where
	C: ?Sized + MarketplaceHttpClient,
{
	let catalog = service.load_catalog().await.unwrap_or_else(|e| {
		tracing::warn!(error = %e, "Rendering empty catalog after load failure.");

		Catalog::default()
	});

	Html(page::render(service.storefront(), &catalog))
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "Failed to listen for Ctrl-C; serving until killed.");

		std::future::pending::<()>().await;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		error::{ConfigError, TransportError, UpstreamAuthError, UpstreamParseError},
		obs::Stage,
	};

	fn body_of(e: impl Into<Error>) -> ErrorBody {
		ApiError(e.into()).body()
	}

	#[test]
	fn search_failure_forwards_upstream_body() {
		let body =
			body_of(UpstreamSearchError { status: 500, body: "boom".into(), retry_after: None });

		assert_eq!(body.error, "Marketplace search failed");
		assert_eq!(body.details.as_deref(), Some("boom"));
	}

	#[test]
	fn auth_and_transport_failures_hide_details() {
		let body = body_of(UpstreamAuthError::Rejected {
			status: 401,
			body: "{\"error\":\"invalid_client\"}".into(),
			retry_after: None,
		});

		assert_eq!(body, ErrorBody { error: "Marketplace authentication failed".into(), details: None });

		let body = body_of(Error::transport(
			Stage::InventorySearch,
			TransportError::Io(std::io::Error::other("reset")),
		));

		assert_eq!(body, ErrorBody { error: "Marketplace is unreachable".into(), details: None });
	}

	#[test]
	fn config_failure_names_the_missing_value() {
		let body = body_of(ConfigError::MissingCredential { name: "EBAY_SELLER_ID" });

		assert_eq!(body.error, "Missing required configuration value: EBAY_SELLER_ID.");
		assert_eq!(body.details, None);
	}

	#[test]
	fn parse_failure_reports_path() {
		let mut de = serde_json::Deserializer::from_str("{\"itemSummaries\":7}");
		let source = serde_path_to_error::deserialize::<_, crate::catalog::SearchResponse>(&mut de)
			.expect_err("Number is not a list.");
		let body = body_of(UpstreamParseError { status: 200, source });

		assert_eq!(body.error, "Marketplace returned an unexpected response");
		assert!(body.details.is_some_and(|details| details.contains("itemSummaries")));
	}

	#[test]
	fn error_body_omits_absent_details() {
		let json = serde_json::to_value(ErrorBody { error: "x".into(), details: None })
			.expect("Body should serialize.");

		assert_eq!(json, serde_json::json!({ "error": "x" }));
	}

	#[test]
	fn responses_use_server_error_status() {
		let response =
			ApiError(ConfigError::MissingCredential { name: "EBAY_CLIENT_ID" }.into()).into_response();

		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
