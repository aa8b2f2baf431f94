//! Test logging utilities
//!
//! Provides utilities for initializing logging in test environments.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once)
///
/// Safe to call from every test; only the first call installs the logger.
/// `tracing` events reach it through the `log` feature. Filter with
/// `RUST_LOG`, e.g. `RUST_LOG=userapi::request=info`.
///
/// # Examples
///
/// ```
/// use userapi_test::logging::init_test_logging;
///
/// init_test_logging();
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = env_logger::builder().is_test(true).try_init();
	});
}
