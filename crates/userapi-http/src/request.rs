//! Incoming request representation.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri, Version};
use std::net::SocketAddr;
use userapi_core::{Error, Result};

/// HTTP Request representation
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	/// Peer address, unset for in-process requests
	pub remote_addr: Option<SocketAddr>,
}

impl Request {
	/// Create a request from its parts
	///
	/// # Examples
	///
	/// ```
	/// use userapi_http::Request;
	/// use http::{HeaderMap, Method, Uri, Version};
	/// use bytes::Bytes;
	///
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/users/?page=2"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	/// assert_eq!(request.path(), "/users/");
	/// assert_eq!(request.query_string(), Some("page=2"));
	/// ```
	pub fn new(method: Method, uri: Uri, version: Version, headers: HeaderMap, body: Bytes) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
			remote_addr: None,
		}
	}

	/// Start building a request
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	/// Request path without the query string
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Raw query string, if any
	pub fn query_string(&self) -> Option<&str> {
		self.uri.query()
	}

	/// Header value as a string, if present and valid UTF-8
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}
}

/// Builder for [`Request`]
///
/// # Examples
///
/// ```
/// use userapi_http::Request;
/// use http::Method;
///
/// let request = Request::builder()
///     .method(Method::POST)
///     .uri("/users/")
///     .body("{}")
///     .build()
///     .unwrap();
/// assert_eq!(request.method, Method::POST);
/// assert_eq!(request.body.as_ref(), b"{}");
/// ```
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Method,
	uri: Option<String>,
	version: Version,
	headers: HeaderMap,
	body: Bytes,
	remote_addr: Option<SocketAddr>,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = version;
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	pub fn remote_addr(mut self, addr: SocketAddr) -> Self {
		self.remote_addr = Some(addr);
		self
	}

	/// Build the request
	///
	/// # Errors
	///
	/// Returns [`Error::Http`] if no URI was set or the URI does not parse.
	pub fn build(self) -> Result<Request> {
		let raw = self
			.uri
			.ok_or_else(|| Error::Http("request URI is required".to_string()))?;
		let uri: Uri = raw
			.parse()
			.map_err(|e: http::uri::InvalidUri| Error::Http(format!("{}: {}", raw, e)))?;

		Ok(Request {
			method: self.method,
			uri,
			version: self.version,
			headers: self.headers,
			body: self.body,
			remote_addr: self.remote_addr,
		})
	}
}
