//! Test response wrapper with assertion helpers

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Response captured by the [`APIClient`](crate::APIClient)
#[derive(Debug, Clone)]
pub struct TestResponse {
	status: StatusCode,
	headers: HeaderMap,
	body: Bytes,
}

impl TestResponse {
	/// Create a test response with status, headers, and body
	///
	/// # Examples
	///
	/// ```
	/// use userapi_test::response::TestResponse;
	/// use http::{HeaderMap, StatusCode};
	/// use bytes::Bytes;
	///
	/// let response = TestResponse::with_body(StatusCode::OK, HeaderMap::new(), Bytes::from("[]"));
	/// assert_eq!(response.status_code(), 200);
	/// assert_eq!(response.text(), "[]");
	/// ```
	pub fn with_body(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
		Self {
			status,
			headers,
			body,
		}
	}

	/// Get response status
	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// Get response status code as u16
	pub fn status_code(&self) -> u16 {
		self.status.as_u16()
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	pub fn body(&self) -> &Bytes {
		&self.body
	}

	/// Get response body as string
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).to_string()
	}

	/// Parse response body as JSON
	pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
		serde_json::from_slice(&self.body)
	}

	/// Parse response body as generic JSON value
	pub fn json_value(&self) -> Result<Value, serde_json::Error> {
		serde_json::from_slice(&self.body)
	}

	/// Check if response is successful (2xx)
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Check if response is client error (4xx)
	pub fn is_client_error(&self) -> bool {
		self.status.is_client_error()
	}

	/// Check if response is server error (5xx)
	pub fn is_server_error(&self) -> bool {
		self.status.is_server_error()
	}

	pub fn content_type(&self) -> Option<&str> {
		self.header("content-type")
	}

	/// Get header value
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}
}

/// Extension trait for Response assertions
///
/// Failures panic with `<expected> != <actual>` followed by the body, so a
/// failing test names both status codes.
pub trait ResponseExt {
	/// Assert status code
	fn assert_status(&self, expected: StatusCode) -> &Self;

	/// Assert 2xx success
	fn assert_success(&self) -> &Self;

	/// Assert 4xx client error
	fn assert_client_error(&self) -> &Self;

	/// Assert 5xx server error
	fn assert_server_error(&self) -> &Self;

	/// Assert specific status codes
	fn assert_ok(&self) -> &Self;
	fn assert_not_found(&self) -> &Self;
	fn assert_method_not_allowed(&self) -> &Self;
	fn assert_permanent_redirect(&self) -> &Self;
}

impl ResponseExt for TestResponse {
	fn assert_status(&self, expected: StatusCode) -> &Self {
		assert!(
			self.status == expected,
			"{} != {}. Body: {}",
			expected.as_u16(),
			self.status.as_u16(),
			self.text()
		);
		self
	}

	fn assert_success(&self) -> &Self {
		assert!(
			self.is_success(),
			"Expected success status (2xx), got {}. Body: {}",
			self.status,
			self.text()
		);
		self
	}

	fn assert_client_error(&self) -> &Self {
		assert!(
			self.is_client_error(),
			"Expected client error status (4xx), got {}. Body: {}",
			self.status,
			self.text()
		);
		self
	}

	fn assert_server_error(&self) -> &Self {
		assert!(
			self.is_server_error(),
			"Expected server error status (5xx), got {}. Body: {}",
			self.status,
			self.text()
		);
		self
	}

	fn assert_ok(&self) -> &Self {
		self.assert_status(StatusCode::OK)
	}

	fn assert_not_found(&self) -> &Self {
		self.assert_status(StatusCode::NOT_FOUND)
	}

	fn assert_method_not_allowed(&self) -> &Self {
		self.assert_status(StatusCode::METHOD_NOT_ALLOWED)
	}

	fn assert_permanent_redirect(&self) -> &Self {
		self.assert_status(StatusCode::PERMANENT_REDIRECT)
	}
}
