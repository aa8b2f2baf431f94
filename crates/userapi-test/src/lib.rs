//! Testing utilities for userapi
//!
//! - [`APIClient`]: drives a handler in-process, no port bound
//! - [`TestResponse`] and [`ResponseExt`]: captured responses and status assertions
//! - [`TestApp`] and [`APITestCase`]: per-test application setup
//! - [`init_test_logging`]: once-only logger for test output
//!
//! ```rust,ignore
//! use userapi_test::{APITestCase, ResponseExt};
//!
//! #[tokio::test]
//! async fn test_get_users() {
//!     let case = APITestCase::setup(userapi::create_app).unwrap();
//!     case.client().get("/users/").await.unwrap().assert_ok();
//! }
//! ```

pub mod client;
pub mod logging;
pub mod response;
pub mod testcase;

pub use client::{APIClient, APIClientBuilder, ClientError, ClientResult};
pub use logging::init_test_logging;
pub use response::{ResponseExt, TestResponse};
pub use testcase::{APITestCase, SetupError, TestApp};
