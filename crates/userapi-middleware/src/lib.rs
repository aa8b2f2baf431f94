//! Middleware shipped with userapi.

pub mod logging;

pub use logging::LoggingMiddleware;
