//! HTTP request/response types and the handler abstraction.
//!
//! Everything that answers requests in userapi (views, routers, middleware
//! chains, whole applications) implements [`Handler`]. The server and the
//! in-process test client only ever talk to an `Arc<dyn Handler>`.
//!
//! ```rust
//! use userapi_http::{Handler, Request, Response};
//! use async_trait::async_trait;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//!     async fn handle(&self, _request: Request) -> userapi_core::Result<Response> {
//!         Ok(Response::ok().with_body("hello"))
//!     }
//! }
//! ```

pub mod middleware;
pub mod request;
pub mod response;

pub use middleware::{Handler, Middleware, MiddlewareChain};
pub use request::{Request, RequestBuilder};
pub use response::Response;

pub use userapi_core::{Error, Result};
