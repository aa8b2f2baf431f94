use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use std::sync::Arc;
use userapi_core::{Error, Result};
use userapi_http::{Handler, Request, Response};

use crate::Route;

/// Dispatches requests to the first route whose path and method match.
///
/// # Examples
///
/// ```
/// use userapi_urls::{Route, Router};
/// use std::sync::Arc;
/// # use userapi_http::{Handler, Request, Response};
/// # struct UserList;
/// # #[async_trait::async_trait]
/// # impl Handler for UserList {
/// #     async fn handle(&self, _r: Request) -> userapi_core::Result<Response> {
/// #         Ok(Response::ok())
/// #     }
/// # }
///
/// let router = Router::new()
///     .route(Route::get("/users/", Arc::new(UserList)).with_namespace("users").with_name("list"));
/// assert_eq!(router.reverse("users:list"), Some("/users/"));
/// assert_eq!(router.routes().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Router {
	routes: Vec<Route>,
}

impl Router {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a route using builder pattern
	pub fn route(mut self, route: Route) -> Self {
		self.add_route(route);
		self
	}

	/// Register a route
	pub fn add_route(&mut self, route: Route) {
		let name = route.full_name();
		tracing::debug!(
			path = %route.path,
			name = name.as_deref().unwrap_or("-"),
			"registered route"
		);
		self.routes.push(route);
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Look up a route path by its full name (`namespace:name`)
	pub fn reverse(&self, full_name: &str) -> Option<&str> {
		self.routes
			.iter()
			.find(|r| r.full_name().as_deref() == Some(full_name))
			.map(|r| r.path.as_str())
	}

	fn routes_for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Route> + 'a {
		self.routes.iter().filter(move |r| r.path == path)
	}

	fn has_path(&self, path: &str) -> bool {
		self.routes.iter().any(|r| r.path == path)
	}

	fn redirect_to_slash(request: &Request) -> Response {
		let location = match request.query_string() {
			Some(query) => format!("{}/?{}", request.path(), query),
			None => format!("{}/", request.path()),
		};
		Response::permanent_redirect(location)
	}
}

#[async_trait]
impl Handler for Router {
	async fn handle(&self, request: Request) -> Result<Response> {
		let path = request.path().to_string();

		let matched: Option<Arc<dyn Handler>> = self
			.routes_for_path(&path)
			.find(|r| r.allows(&request.method))
			.map(|r| r.handler.clone());

		if let Some(handler) = matched {
			let is_head = request.method == Method::HEAD;
			let mut response = handler.handle(request).await?;
			if is_head {
				response.body = Bytes::new();
			}
			return Ok(response);
		}

		let mut allowed: Vec<&str> = Vec::new();
		for route in self.routes_for_path(&path) {
			for method in route.allowed_methods() {
				if !allowed.contains(&method) {
					allowed.push(method);
				}
			}
		}
		if !allowed.is_empty() {
			let detail = Error::MethodNotAllowed(request.method.to_string());
			let mut response = Response::from_error(&detail);
			response.headers.extend(Response::method_not_allowed(&allowed).headers);
			return Ok(response);
		}

		if !path.ends_with('/') && self.has_path(&format!("{}/", path)) {
			return Ok(Self::redirect_to_slash(&request));
		}

		Ok(Response::from_error(&Error::NotFound(path)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::StatusCode;
	use rstest::{fixture, rstest};

	struct Body(&'static str);

	#[async_trait]
	impl Handler for Body {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Ok(Response::ok().with_body(self.0))
		}
	}

	#[fixture]
	fn router() -> Router {
		Router::new()
			.route(Route::get("/users/", Arc::new(Body("list"))).with_name("list"))
			.route(Route::new("/users/", vec![Method::DELETE], Arc::new(Body("purge"))))
	}

	fn request(method: Method, uri: &str) -> Request {
		Request::builder().method(method).uri(uri).build().unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_get_dispatches(router: Router) {
		let response = router.handle(request(Method::GET, "/users/")).await.unwrap();
		assert_eq!(response.status, StatusCode::OK);
		assert_eq!(response.body.as_ref(), b"list");
	}

	#[rstest]
	#[tokio::test]
	async fn test_second_route_on_same_path(router: Router) {
		let response = router
			.handle(request(Method::DELETE, "/users/"))
			.await
			.unwrap();
		assert_eq!(response.body.as_ref(), b"purge");
	}

	#[rstest]
	#[tokio::test]
	async fn test_head_strips_body(router: Router) {
		let response = router.handle(request(Method::HEAD, "/users/")).await.unwrap();
		assert_eq!(response.status, StatusCode::OK);
		assert!(response.body.is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_wrong_method_is_405_with_allow(router: Router) {
		let response = router.handle(request(Method::POST, "/users/")).await.unwrap();
		assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(response.headers.get("allow").unwrap(), "GET, HEAD, DELETE");
	}

	#[rstest]
	#[case("/users", "/users/")]
	#[case("/users?page=2", "/users/?page=2")]
	#[tokio::test]
	async fn test_missing_slash_redirects(router: Router, #[case] uri: &str, #[case] location: &str) {
		let response = router.handle(request(Method::GET, uri)).await.unwrap();
		assert_eq!(response.status, StatusCode::PERMANENT_REDIRECT);
		assert_eq!(response.headers.get("location").unwrap(), location);
	}

	#[rstest]
	#[case("/nope/")]
	#[case("/nope")]
	#[case("/users/1/")]
	#[tokio::test]
	async fn test_unknown_path_is_404(router: Router, #[case] uri: &str) {
		let response = router.handle(request(Method::GET, uri)).await.unwrap();
		assert_eq!(response.status, StatusCode::NOT_FOUND);
	}

	#[rstest]
	fn test_reverse_unknown_name(router: Router) {
		assert_eq!(router.reverse("list"), Some("/users/"));
		assert_eq!(router.reverse("missing"), None);
	}
}
