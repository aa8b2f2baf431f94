use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use userapi_core::Result;
use userapi_http::{Handler, Middleware, Request, Response};

/// Logging middleware
/// Logs request/response information
pub struct LoggingMiddleware;

impl LoggingMiddleware {
	/// Create a new logging middleware
	///
	/// Each request is logged with its method, path, status code and duration
	/// through `tracing` under the `userapi::request` target.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use userapi_middleware::LoggingMiddleware;
	/// use userapi_http::MiddlewareChain;
	/// # use userapi_http::{Handler, Request, Response};
	/// # struct Ok200;
	/// # #[async_trait::async_trait]
	/// # impl Handler for Ok200 {
	/// #     async fn handle(&self, _r: Request) -> userapi_core::Result<Response> {
	/// #         Ok(Response::ok())
	/// #     }
	/// # }
	///
	/// let chain = MiddlewareChain::new(Arc::new(Ok200))
	///     .with_middleware(Arc::new(LoggingMiddleware::new()));
	/// assert_eq!(chain.len(), 1);
	/// ```
	pub fn new() -> Self {
		Self
	}
}

impl Default for LoggingMiddleware {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Middleware for LoggingMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let start = Instant::now();
		let method = request.method.clone();
		let path = request.path().to_string();

		let result = next.handle(request).await;

		let elapsed_ms = start.elapsed().as_millis();
		match &result {
			Ok(response) => {
				tracing::info!(
					target: "userapi::request",
					"{} {} - {} ({} ms)",
					method,
					path,
					response.status.as_u16(),
					elapsed_ms
				);
			}
			Err(err) => {
				tracing::error!(
					target: "userapi::request",
					"{} {} - ERROR: {} ({} ms)",
					method,
					path,
					err,
					elapsed_ms
				);
			}
		}

		result
	}
}
