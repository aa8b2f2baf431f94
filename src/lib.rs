//! # userapi
//!
//! A small user API service and its in-process test harness.
//!
//! The application factory ([`create_app`]) builds a router with a single
//! `GET /users/` route, wraps it in request logging middleware and returns an
//! [`Application`]. Tests drive it through [`Application::test_client`]
//! without binding a port; the `manage` binary serves it over HTTP.
//!
//! ## Crates
//!
//! - `userapi-core` - error type
//! - `userapi-http` - request, response and handler abstractions
//! - `userapi-urls` - routing
//! - `userapi-middleware` - request logging
//! - `userapi-conf` - layered settings
//! - `userapi-server` - hyper server (feature `server`, on by default)
//! - `userapi-test` - test client and assertions
//!
//! ## Quick Example
//!
//! ```rust
//! use userapi::{ResponseExt, Settings, create_app_with_settings};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let app = create_app_with_settings(Settings::default()).unwrap();
//! let client = app.test_client();
//! let response = client.get("/users/").await.unwrap();
//! response.assert_ok();
//! assert_eq!(response.status_code(), 200);
//! # }
//! ```

pub mod app;
pub mod views;

pub use app::{Application, create_app, create_app_with_settings};
pub use userapi_core::{Error, Result};

pub use userapi_conf::{Settings, SettingsError, UserConfig};
pub use userapi_http::{Handler, Middleware, MiddlewareChain, Request, Response};
pub use userapi_middleware::LoggingMiddleware;
#[cfg(feature = "server")]
pub use userapi_server::{HttpServer, ServerError, serve, shutdown_signal};
pub use userapi_test::{APIClient, APITestCase, ResponseExt, TestApp, TestResponse};
pub use userapi_urls::{Route, Router};
