//! Application factory.

use std::sync::Arc;
use userapi_conf::Settings;
use userapi_core::{Error, Result};
use userapi_http::{Handler, MiddlewareChain};
use userapi_middleware::LoggingMiddleware;
use userapi_test::{APIClient, TestApp};
use userapi_urls::{Route, Router};

use crate::views::{User, UserListView};

/// A configured application: settings plus the composed request handler
///
/// Cloning is cheap; clones share the handler.
#[derive(Clone)]
pub struct Application {
	settings: Arc<Settings>,
	router: Arc<Router>,
	handler: Arc<dyn Handler>,
}

impl Application {
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn router(&self) -> &Router {
		&self.router
	}

	/// The composed handler (middleware chain around the router)
	pub fn handler(&self) -> Arc<dyn Handler> {
		self.handler.clone()
	}

	/// Path of the route registered under `full_name`, e.g. `users:list`
	pub fn reverse(&self, full_name: &str) -> Option<&str> {
		self.router.reverse(full_name)
	}

	/// In-process client bound to this application
	pub fn test_client(&self) -> APIClient {
		APIClient::with_handler(self.handler())
	}
}

impl TestApp for Application {
	fn handler(&self) -> Arc<dyn Handler> {
		Application::handler(self)
	}
}

/// Create the application from settings loaded from the default sources
///
/// Reads `userapi.toml` in the working directory when present and
/// `USERAPI_*` environment variables.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the settings cannot be loaded or are invalid.
pub fn create_app() -> Result<Application> {
	let settings = Settings::load(None).map_err(|err| Error::Configuration(err.to_string()))?;
	create_app_with_settings(settings)
}

/// Create the application from explicit settings
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the settings fail validation.
///
/// # Examples
///
/// ```
/// use userapi::create_app_with_settings;
/// use userapi_conf::Settings;
///
/// let app = create_app_with_settings(Settings::default()).unwrap();
/// assert_eq!(app.reverse("users:list"), Some("/users/"));
/// ```
pub fn create_app_with_settings(settings: Settings) -> Result<Application> {
	settings
		.validate()
		.map_err(|err| Error::Configuration(err.to_string()))?;

	let users: Vec<User> = settings.users.iter().map(User::from).collect();
	let router = Arc::new(
		Router::new().route(
			Route::get("/users/", Arc::new(UserListView::new(users)))
				.with_namespace("users")
				.with_name("list"),
		),
	);

	let chain = MiddlewareChain::new(router.clone())
		.with_middleware(Arc::new(LoggingMiddleware::new()));

	tracing::debug!(
		users = settings.users.len(),
		debug = settings.debug,
		"application created"
	);

	Ok(Application {
		settings: Arc::new(settings),
		router,
		handler: Arc::new(chain),
	})
}
