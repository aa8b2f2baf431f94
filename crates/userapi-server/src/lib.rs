//! HTTP server for userapi.
//!
//! Serves any [`Handler`](userapi_http::Handler) over HTTP/1.1 using hyper.
//!
//! ## Basic Usage
//!
//! ```rust,ignore
//! use userapi_server::{HttpServer, shutdown_signal};
//! use std::sync::Arc;
//!
//! let server = HttpServer::new(Arc::new(MyHandler));
//! server.listen_with_shutdown("127.0.0.1:8000".parse()?, shutdown_signal()).await?;
//! ```

pub mod http;

pub use http::{HttpServer, ServerError, serve, shutdown_signal};
