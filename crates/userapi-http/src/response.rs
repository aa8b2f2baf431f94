use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE, LOCATION};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::Serialize;
use userapi_core::{Error, Result};

/// HTTP Response representation
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use userapi_http::Response;
	/// use http::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// Create a Response with HTTP 200 OK status
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Create a Response with HTTP 404 Not Found status
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// Create a Response with HTTP 405 Method Not Allowed and an `Allow` header
	///
	/// # Examples
	///
	/// ```
	/// use userapi_http::Response;
	/// use http::StatusCode;
	///
	/// let response = Response::method_not_allowed(&["GET", "HEAD"]);
	/// assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
	/// assert_eq!(response.headers.get("allow").unwrap(), "GET, HEAD");
	/// ```
	pub fn method_not_allowed(allowed: &[&str]) -> Self {
		let mut response = Self::new(StatusCode::METHOD_NOT_ALLOWED);
		if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
			response.headers.insert(ALLOW, value);
		}
		response
	}

	/// Create a Response with HTTP 308 Permanent Redirect (preserves HTTP method)
	///
	/// # Examples
	///
	/// ```
	/// use userapi_http::Response;
	/// use http::StatusCode;
	///
	/// let response = Response::permanent_redirect("/users/");
	/// assert_eq!(response.status, StatusCode::PERMANENT_REDIRECT);
	/// assert_eq!(response.headers.get("location").unwrap(), "/users/");
	/// ```
	pub fn permanent_redirect(location: impl AsRef<str>) -> Self {
		Self::new(StatusCode::PERMANENT_REDIRECT).with_location(location.as_ref())
	}

	/// Build the response a handler error is reported as
	///
	/// The body is a JSON object with a single `detail` field.
	pub fn from_error(err: &Error) -> Self {
		let body = serde_json::json!({ "detail": err.to_string() });
		let mut response = Self::new(err.status_code());
		response
			.headers
			.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		response.body = Bytes::from(body.to_string());
		response
	}

	/// Set the response body
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a custom header to the response
	///
	/// Invalid header names or values are ignored.
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let (Ok(name), Ok(value)) = (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			self.headers.insert(name, value);
		}
		self
	}

	/// Set the `Location` header
	pub fn with_location(self, location: &str) -> Self {
		self.with_header(LOCATION.as_str(), location)
	}

	/// Serialize `data` as the JSON body and set the content type
	///
	/// # Errors
	///
	/// Returns [`Error::Serialization`] if `data` cannot be encoded.
	///
	/// # Examples
	///
	/// ```
	/// use userapi_http::Response;
	/// use serde_json::json;
	///
	/// let response = Response::ok().with_json(&json!([{"id": 1}])).unwrap();
	/// assert_eq!(response.headers.get("content-type").unwrap(), "application/json");
	/// assert_eq!(response.body.as_ref(), br#"[{"id":1}]"#);
	/// ```
	pub fn with_json<T: Serialize>(mut self, data: &T) -> Result<Self> {
		let body = serde_json::to_vec(data)?;
		self.headers
			.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		self.body = Bytes::from(body);
		Ok(self)
	}
}
