use http::Method;
use std::sync::Arc;
use userapi_http::Handler;

/// Route definition
/// Combines a path and the methods it answers with a handler
#[derive(Clone)]
pub struct Route {
	pub path: String,
	pub methods: Vec<Method>,
	pub handler: Arc<dyn Handler>,
	pub name: Option<String>,
	/// Namespace for this route (e.g., "users", "api")
	/// When combined with name, forms "namespace:name"
	pub namespace: Option<String>,
}

impl Route {
	/// Create a new route answering the given methods
	pub fn new(path: impl Into<String>, methods: Vec<Method>, handler: Arc<dyn Handler>) -> Self {
		Self {
			path: path.into(),
			methods,
			handler,
			name: None,
			namespace: None,
		}
	}

	/// Create a GET route
	///
	/// # Examples
	///
	/// ```
	/// use userapi_urls::Route;
	/// use std::sync::Arc;
	/// # use userapi_http::{Handler, Request, Response};
	/// # struct Dummy;
	/// # #[async_trait::async_trait]
	/// # impl Handler for Dummy {
	/// #     async fn handle(&self, _r: Request) -> userapi_core::Result<Response> {
	/// #         Ok(Response::ok())
	/// #     }
	/// # }
	///
	/// let route = Route::get("/users/", Arc::new(Dummy));
	/// assert_eq!(route.path, "/users/");
	/// assert!(route.allows(&http::Method::GET));
	/// assert!(route.allows(&http::Method::HEAD));
	/// assert!(!route.allows(&http::Method::POST));
	/// ```
	pub fn get(path: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
		Self::new(path, vec![Method::GET], handler)
	}

	/// Set the name of the route
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Set the namespace of the route
	pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = Some(namespace.into());
		self
	}

	/// Get the full name including namespace (e.g., "users:list")
	///
	/// # Examples
	///
	/// ```
	/// use userapi_urls::Route;
	/// use std::sync::Arc;
	/// # use userapi_http::{Handler, Request, Response};
	/// # struct Dummy;
	/// # #[async_trait::async_trait]
	/// # impl Handler for Dummy {
	/// #     async fn handle(&self, _r: Request) -> userapi_core::Result<Response> {
	/// #         Ok(Response::ok())
	/// #     }
	/// # }
	/// let handler = Arc::new(Dummy);
	///
	/// let route = Route::get("/users/", handler.clone())
	///     .with_namespace("users")
	///     .with_name("list");
	/// assert_eq!(route.full_name(), Some("users:list".to_string()));
	///
	/// let route = Route::get("/users/", handler);
	/// assert_eq!(route.full_name(), None);
	/// ```
	pub fn full_name(&self) -> Option<String> {
		match (&self.namespace, &self.name) {
			(Some(ns), Some(name)) => Some(format!("{}:{}", ns, name)),
			(None, Some(name)) => Some(name.clone()),
			_ => None,
		}
	}

	/// Whether the route answers `method`. GET routes also answer HEAD.
	pub fn allows(&self, method: &Method) -> bool {
		self.methods.contains(method) || (*method == Method::HEAD && self.methods.contains(&Method::GET))
	}

	/// Methods advertised in an `Allow` header
	pub fn allowed_methods(&self) -> Vec<&str> {
		let mut allowed: Vec<&str> = self.methods.iter().map(Method::as_str).collect();
		if self.methods.contains(&Method::GET) && !self.methods.contains(&Method::HEAD) {
			allowed.push(Method::HEAD.as_str());
		}
		allowed
	}
}
