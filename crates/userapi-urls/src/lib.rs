//! URL routing for userapi.
//!
//! A [`Router`] maps `(method, path)` pairs to handlers and is itself a
//! [`Handler`](userapi_http::Handler), so it can be wrapped in a middleware
//! chain, served over TCP or driven by the in-process test client.
//!
//! Paths match exactly. A request for a path without its trailing slash is
//! redirected (308) to the slashed path when that path is routed.

pub mod route;
pub mod router;

pub use route::Route;
pub use router::Router;
