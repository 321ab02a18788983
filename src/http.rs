//! Transport primitives for marketplace calls.
//!
//! [`MarketplaceHttpClient`] is the catalog's only dependency on an HTTP stack. The token
//! provider and the inventory adapter describe each call as a [`MarketplaceRequest`] and get
//! back a fully buffered [`MarketplaceResponse`]; status interpretation stays with the caller
//! so each stage can classify failures in its own taxonomy.

// std
use std::time::Duration as StdDuration;
// crates.io
use reqwest::header::{HeaderMap, RETRY_AFTER};
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`MarketplaceHttpClient::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<MarketplaceResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to reach the marketplace.
///
/// Implementations must be `Send + Sync + 'static` so a single client can be shared by
/// every in-flight request behind an [`Arc`]. A call either yields the upstream response,
/// whatever its status, or a [`TransportError`] when no response was received.
pub trait MarketplaceHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Dispatches `request` and buffers the whole response body.
	fn execute(&self, request: MarketplaceRequest) -> TransportFuture<'_>;
}

/// HTTP methods used against the marketplace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
	/// `GET` request.
	Get,
	/// `POST` request.
	Post,
}

/// Transport-agnostic description of one outbound call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketplaceRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Fully qualified URL, query string included.
	pub url: Url,
	/// Extra request headers.
	pub headers: Vec<(&'static str, String)>,
	/// Form fields sent as an `application/x-www-form-urlencoded` body.
	pub form: Option<Vec<(String, String)>>,
}
impl MarketplaceRequest {
	/// Creates a `GET` request.
	pub fn get(url: Url) -> Self {
		Self { method: HttpMethod::Get, url, headers: Vec::new(), form: None }
	}

	/// Creates a `POST` request with a form-encoded body.
	pub fn post_form<I, K, V>(url: Url, fields: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let form = fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

		Self { method: HttpMethod::Post, url, headers: Vec::new(), form: Some(form) }
	}

	/// Appends a request header.
	pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
		self.headers.push((name, value.into()));

		self
	}

	/// Returns the first header value registered under `name` (case-insensitive).
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Returns the first form value registered under `name`.
	pub fn form_value(&self, name: &str) -> Option<&str> {
		self.form.as_ref()?.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
	}
}

/// Buffered upstream response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarketplaceResponse {
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl MarketplaceResponse {
	/// Builds a response with the given status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, retry_after: None, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds a client applying `timeout` to every call; `None` leaves calls unbounded.
	pub fn with_timeout(timeout: Option<StdDuration>) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder();

		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self(builder.build()?))
	}
}
impl MarketplaceHttpClient for ReqwestHttpClient {
	fn execute(&self, request: MarketplaceRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
			};
			let mut builder = self.0.request(method, request.url);

			for (name, value) in request.headers {
				builder = builder.header(name, value);
			}
			if let Some(form) = request.form {
				builder = builder.form(&form);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.bytes().await?.to_vec();

			Ok::<_, TransportError>(MarketplaceResponse { status, retry_after, body })
		})
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(i64::from(secs)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

#[cfg(test)]
pub(crate) mod fake {
	//! Scripted transport used by unit tests.

	// std
	use std::collections::VecDeque;
	// crates.io
	use parking_lot::Mutex;
	// self
	use super::*;

	/// Replays queued responses and records every request it receives.
	#[derive(Default)]
	pub(crate) struct RecordingHttpClient {
		responses: Mutex<VecDeque<MarketplaceResponse>>,
		requests: Mutex<Vec<MarketplaceRequest>>,
	}
	impl RecordingHttpClient {
		pub(crate) fn replying<I>(responses: I) -> Self
		where
			I: IntoIterator<Item = MarketplaceResponse>,
		{
			Self {
				responses: Mutex::new(responses.into_iter().collect()),
				requests: Default::default(),
			}
		}

		pub(crate) fn requests(&self) -> Vec<MarketplaceRequest> {
			self.requests.lock().clone()
		}
	}
	impl MarketplaceHttpClient for RecordingHttpClient {
		fn execute(&self, request: MarketplaceRequest) -> TransportFuture<'_> {
			self.requests.lock().push(request);

			let next = self.responses.lock().pop_front();

			Box::pin(async move {
				next.ok_or_else(|| {
					TransportError::Io(std::io::Error::new(
						std::io::ErrorKind::ConnectionRefused,
						"No scripted response left.",
					))
				})
			})
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use reqwest::header::HeaderValue;
	// self
	use super::*;

	#[test]
	fn retry_after_accepts_delta_seconds() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("120"));

		assert_eq!(parse_retry_after(&headers), Some(Duration::seconds(120)));
	}

	#[test]
	fn retry_after_ignores_garbage_and_past_dates() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));

		assert_eq!(parse_retry_after(&headers), None);

		headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));

		assert_eq!(parse_retry_after(&headers), None);
	}

	#[test]
	fn request_helpers_expose_headers_and_form() {
		let url = Url::parse("https://api.ebay.com/identity/v1/oauth2/token")
			.expect("Fixture URL should parse.");
		let request = MarketplaceRequest::post_form(url, [("grant_type", "client_credentials")])
			.header("Authorization", "Basic abc");

		assert_eq!(request.method, HttpMethod::Post);
		assert_eq!(request.header_value("authorization"), Some("Basic abc"));
		assert_eq!(request.form_value("grant_type"), Some("client_credentials"));
		assert_eq!(request.form_value("scope"), None);
	}

	#[test]
	fn success_covers_2xx_only() {
		assert!(MarketplaceResponse::new(204, "").is_success());
		assert!(!MarketplaceResponse::new(301, "").is_success());
		assert!(!MarketplaceResponse::new(500, "boom").is_success());
		assert_eq!(MarketplaceResponse::new(500, "boom").body_text(), "boom");
	}
}
