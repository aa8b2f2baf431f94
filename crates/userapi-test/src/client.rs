//! API Client for testing
//!
//! Drives a [`Handler`] in-process: requests are built, handed to the
//! handler and the response captured, without binding a network port.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST};
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use userapi_http::{Handler, Request, Response};

use crate::response::TestResponse;

#[derive(Debug, Error)]
pub enum ClientError {
	#[error("HTTP error: {0}")]
	Http(#[from] http::Error),

	#[error("Invalid header value: {0}")]
	InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("No handler attached to the client")]
	NoHandler,

	#[error("Request failed: {0}")]
	RequestFailed(String),
}

impl ClientError {
	/// Returns true if the error occurred while building the request
	pub fn is_request(&self) -> bool {
		matches!(
			self,
			ClientError::Http(_)
				| ClientError::InvalidHeaderValue(_)
				| ClientError::Serialization(_)
				| ClientError::RequestFailed(_)
		)
	}
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Builder for creating APIClient with custom configuration
///
/// # Example
/// ```rust
/// use userapi_test::client::APIClientBuilder;
///
/// let client = APIClientBuilder::new()
///     .base_url("http://api.testserver")
///     .build();
/// assert_eq!(client.base_url(), "http://api.testserver");
/// assert!(!client.has_handler());
/// ```
pub struct APIClientBuilder {
	base_url: String,
	handler: Option<Arc<dyn Handler>>,
}

impl APIClientBuilder {
	/// Create a new builder with default configuration
	pub fn new() -> Self {
		Self {
			base_url: "http://testserver".to_string(),
			handler: None,
		}
	}

	/// Set the base URL relative paths are resolved against
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();
		self
	}

	/// Set the handler requests are dispatched to
	pub fn handler(mut self, handler: Arc<dyn Handler>) -> Self {
		self.handler = Some(handler);
		self
	}

	/// Build the APIClient
	pub fn build(self) -> APIClient {
		APIClient {
			base_url: self.base_url.trim_end_matches('/').to_string(),
			default_headers: Arc::new(RwLock::new(HeaderMap::new())),
			handler: self.handler,
		}
	}
}

impl Default for APIClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Test client for making API requests
///
/// # Example
/// ```rust
/// use userapi_test::APIClient;
/// use userapi_http::{Handler, Request, Response};
/// use async_trait::async_trait;
/// use http::StatusCode;
/// use std::sync::Arc;
///
/// struct Hello;
///
/// #[async_trait]
/// impl Handler for Hello {
///     async fn handle(&self, _request: Request) -> userapi_core::Result<Response> {
///         Ok(Response::ok().with_body("hello"))
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = APIClient::with_handler(Arc::new(Hello));
/// let response = client.get("/users/").await?;
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.text(), "hello");
/// # Ok(())
/// # }
/// ```
pub struct APIClient {
	/// Base URL for requests (e.g., "http://testserver")
	base_url: String,

	/// Default headers to include in all requests
	default_headers: Arc<RwLock<HeaderMap>>,

	/// Handler requests are dispatched to
	handler: Option<Arc<dyn Handler>>,
}

impl APIClient {
	/// Create a new API client without a handler
	///
	/// # Examples
	///
	/// ```
	/// use userapi_test::client::APIClient;
	///
	/// let client = APIClient::new();
	/// assert_eq!(client.base_url(), "http://testserver");
	/// ```
	pub fn new() -> Self {
		APIClientBuilder::new().build()
	}

	/// Create a client bound to `handler`
	pub fn with_handler(handler: Arc<dyn Handler>) -> Self {
		APIClientBuilder::new().handler(handler).build()
	}

	/// Create a builder for customizing the client configuration
	pub fn builder() -> APIClientBuilder {
		APIClientBuilder::new()
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub fn has_handler(&self) -> bool {
		self.handler.is_some()
	}

	/// Set a default header for all requests
	///
	/// # Examples
	///
	/// ```
	/// use userapi_test::client::APIClient;
	///
	/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
	/// let client = APIClient::new();
	/// client.set_header("User-Agent", "TestClient/1.0").await.unwrap();
	/// assert!(client.set_header("Bad Name", "x").await.is_err());
	/// # });
	/// ```
	pub async fn set_header(
		&self,
		name: impl AsRef<str>,
		value: impl AsRef<str>,
	) -> ClientResult<()> {
		let header_name: HeaderName = name.as_ref().parse().map_err(|_| {
			ClientError::RequestFailed(format!("Invalid header name: {}", name.as_ref()))
		})?;
		let header_value = HeaderValue::from_str(value.as_ref())?;
		self.default_headers
			.write()
			.await
			.insert(header_name, header_value);
		Ok(())
	}

	/// Clear default headers
	pub async fn cleanup(&self) {
		self.default_headers.write().await.clear();
	}

	/// Make a GET request
	pub async fn get(&self, path: &str) -> ClientResult<TestResponse> {
		self.request(Method::GET, path, None, None).await
	}

	/// Make a HEAD request
	pub async fn head(&self, path: &str) -> ClientResult<TestResponse> {
		self.request(Method::HEAD, path, None, None).await
	}

	/// Make an OPTIONS request
	pub async fn options(&self, path: &str) -> ClientResult<TestResponse> {
		self.request(Method::OPTIONS, path, None, None).await
	}

	/// Make a DELETE request
	pub async fn delete(&self, path: &str) -> ClientResult<TestResponse> {
		self.request(Method::DELETE, path, None, None).await
	}

	/// Make a POST request with a JSON body
	pub async fn post<T: Serialize>(&self, path: &str, data: &T) -> ClientResult<TestResponse> {
		let body = Bytes::from(serde_json::to_vec(data)?);
		self.request(Method::POST, path, Some(body), Some("application/json"))
			.await
	}

	/// Make a PUT request with a JSON body
	pub async fn put<T: Serialize>(&self, path: &str, data: &T) -> ClientResult<TestResponse> {
		let body = Bytes::from(serde_json::to_vec(data)?);
		self.request(Method::PUT, path, Some(body), Some("application/json"))
			.await
	}

	/// Make a PATCH request with a JSON body
	pub async fn patch<T: Serialize>(&self, path: &str, data: &T) -> ClientResult<TestResponse> {
		let body = Bytes::from(serde_json::to_vec(data)?);
		self.request(Method::PATCH, path, Some(body), Some("application/json"))
			.await
	}

	/// Make a POST request with raw body
	///
	/// Unlike `post()`, the body is sent as given without serialization.
	pub async fn post_raw(
		&self,
		path: &str,
		body: &[u8],
		content_type: &str,
	) -> ClientResult<TestResponse> {
		self.request(
			Method::POST,
			path,
			Some(Bytes::copy_from_slice(body)),
			Some(content_type),
		)
		.await
	}

	/// Make a GET request with additional per-request headers
	pub async fn get_with_headers(
		&self,
		path: &str,
		headers: &[(&str, &str)],
	) -> ClientResult<TestResponse> {
		self.request_with_extra_headers(Method::GET, path, None, None, headers)
			.await
	}

	/// Generic request method
	async fn request(
		&self,
		method: Method,
		path: &str,
		body: Option<Bytes>,
		content_type: Option<&str>,
	) -> ClientResult<TestResponse> {
		self.request_with_extra_headers(method, path, body, content_type, &[])
			.await
	}

	/// Generic request method with additional per-request headers
	///
	/// Extra headers override default headers of the same name for this
	/// request only.
	async fn request_with_extra_headers(
		&self,
		method: Method,
		path: &str,
		body: Option<Bytes>,
		content_type: Option<&str>,
		extra_headers: &[(&str, &str)],
	) -> ClientResult<TestResponse> {
		let handler = self.handler.as_ref().ok_or(ClientError::NoHandler)?;

		let url = if path.starts_with("http://") || path.starts_with("https://") {
			path.to_string()
		} else {
			format!("{}{}", self.base_url, path)
		};
		let uri: Uri = url.parse().map_err(http::Error::from)?;

		let mut headers = self.default_headers.read().await.clone();
		for (name, value) in extra_headers {
			let name = HeaderName::from_bytes(name.as_bytes()).map_err(http::Error::from)?;
			headers.insert(name, HeaderValue::from_str(value)?);
		}
		if let Some(ct) = content_type {
			headers.insert(CONTENT_TYPE, HeaderValue::from_str(ct)?);
		}
		if !headers.contains_key(HOST)
			&& let Some(authority) = uri.authority()
		{
			headers.insert(HOST, HeaderValue::from_str(authority.as_str())?);
		}

		let request = Request::builder()
			.method(method)
			.uri(uri.to_string())
			.headers(headers)
			.body(body.unwrap_or_default())
			.build()
			.map_err(|err| ClientError::RequestFailed(err.to_string()))?;

		// Mirror the server: handler errors become error responses
		let response = handler.handle(request).await.unwrap_or_else(|err| {
			tracing::debug!("Handler error in test client: {}", err);
			Response::from_error(&err)
		});

		Ok(TestResponse::with_body(
			response.status,
			response.headers,
			response.body,
		))
	}
}

impl Default for APIClient {
	fn default() -> Self {
		Self::new()
	}
}
