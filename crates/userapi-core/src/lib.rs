//! # userapi core
//!
//! Shared building blocks for the userapi crates.
//!
//! ## Modules
//!
//! - [`exception`]: the [`Error`] type every handler returns and its mapping
//!   onto HTTP status codes

pub mod exception;

pub use exception::{Error, Result};
