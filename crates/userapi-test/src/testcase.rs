//! Base test case with per-test setup
//!
//! Similar to DRF's APITestCase: every test builds its own application
//! through a factory and gets a fresh client bound to it.

use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;
use userapi_http::Handler;

use crate::client::APIClient;

/// An application the test harness can drive
///
/// Anything that exposes a composed handler can hand out an in-process
/// client. The harness only relies on this trait, so tests can swap the
/// real application for a stub.
pub trait TestApp: Send + Sync {
	/// The handler that answers every request
	fn handler(&self) -> Arc<dyn Handler>;

	/// A new client bound to [`TestApp::handler`]
	fn test_client(&self) -> APIClient {
		APIClient::with_handler(self.handler())
	}
}

impl TestApp for Arc<dyn Handler> {
	fn handler(&self) -> Arc<dyn Handler> {
		self.clone()
	}
}

/// The application factory failed while setting up a test case
#[derive(Debug, Error)]
#[error("Test case setup failed: {source}")]
pub struct SetupError {
	#[source]
	source: Box<dyn StdError + Send + Sync>,
}

/// Base test case for API testing
///
/// # Example
/// ```ignore
/// #[tokio::test]
/// async fn test_list_users() {
///     let case = APITestCase::setup(userapi::create_app).unwrap();
///     case.client().get("/users/").await.unwrap().assert_ok();
///     case.teardown().await;
/// }
/// ```
pub struct APITestCase<A: TestApp> {
	app: A,
	client: APIClient,
}

impl<A: TestApp> APITestCase<A> {
	/// Build the application with `factory` and a client bound to it
	///
	/// # Errors
	///
	/// Returns [`SetupError`] wrapping the factory's error.
	pub fn setup<F, E>(factory: F) -> Result<Self, SetupError>
	where
		F: FnOnce() -> Result<A, E>,
		E: Into<Box<dyn StdError + Send + Sync>>,
	{
		let app = factory().map_err(|err| SetupError { source: err.into() })?;
		let client = app.test_client();
		tracing::debug!("test case set up");
		Ok(Self { app, client })
	}

	pub fn app(&self) -> &A {
		&self.app
	}

	/// Get the test client
	pub fn client(&self) -> &APIClient {
		&self.client
	}

	/// Teardown called after each test
	pub async fn teardown(self) {
		self.client.cleanup().await;
		tracing::debug!("test case torn down");
	}
}
