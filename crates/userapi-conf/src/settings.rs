use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::builder::SettingsBuilder;
use crate::error::SettingsError;
use crate::sources::{DefaultSource, EnvSource, TomlFileSource};

/// Config file read by [`Settings::load`] when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "userapi.toml";

/// Prefix of environment variables read by [`Settings::load`]
pub const ENV_PREFIX: &str = "USERAPI_";

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Application settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Debug mode
	pub debug: bool,

	/// Interface the server binds to
	pub host: String,

	/// Port the server binds to (0 picks a free port)
	pub port: u16,

	/// Log filter passed to the logger (`off`, `error`, ..., `trace`)
	pub log_level: String,

	/// Users listed by `GET /users/`
	pub users: Vec<UserConfig>,
}

/// A user entry from the configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
	pub id: u64,
	pub username: String,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			debug: false,
			host: "127.0.0.1".to_string(),
			port: 8000,
			log_level: "info".to_string(),
			users: Vec::new(),
		}
	}
}

impl Settings {
	/// Load settings from defaults, the given (or default) TOML file and
	/// `USERAPI_*` environment variables
	///
	/// An explicitly given file must exist; the default `userapi.toml` is optional.
	///
	/// # Errors
	///
	/// Returns an error if a source fails to load, a value has the wrong type,
	/// or the result does not pass [`Settings::validate`].
	pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
		let file_source = match config_file {
			Some(path) => TomlFileSource::new(path),
			None => TomlFileSource::new(DEFAULT_CONFIG_FILE).optional(),
		};

		let settings: Settings = SettingsBuilder::new()
			.add_source(DefaultSource::from_settings(&Settings::default()).map_err(|error| {
				SettingsError::Source {
					source_name: "default values".to_string(),
					error,
				}
			})?)
			.add_source(file_source)
			.add_source(EnvSource::new().with_prefix(ENV_PREFIX))
			.build()?
			.into_typed()?;

		settings.validate()?;
		Ok(settings)
	}

	/// Check values that deserialize fine but make no sense
	///
	/// # Examples
	///
	/// ```
	/// use userapi_conf::{Settings, UserConfig};
	///
	/// let mut settings = Settings::default();
	/// assert!(settings.validate().is_ok());
	///
	/// settings.users = vec![
	///     UserConfig { id: 1, username: "alice".into() },
	///     UserConfig { id: 1, username: "bob".into() },
	/// ];
	/// assert!(settings.validate().is_err());
	/// ```
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.host.trim().is_empty() {
			return Err(SettingsError::invalid("host", "must not be empty"));
		}

		if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
			return Err(SettingsError::invalid(
				"log_level",
				format!("expected one of {}, got `{}`", LOG_LEVELS.join(", "), self.log_level),
			));
		}

		let mut seen = HashSet::new();
		for user in &self.users {
			if user.username.trim().is_empty() {
				return Err(SettingsError::invalid(
					"users",
					format!("user {} has an empty username", user.id),
				));
			}
			if !seen.insert(user.id) {
				return Err(SettingsError::invalid(
					"users",
					format!("duplicate user id {}", user.id),
				));
			}
		}

		Ok(())
	}

	/// `host:port` string the server binds to
	///
	/// IPv6 hosts are bracketed unless they already are.
	pub fn bind_address(&self) -> String {
		if self.host.contains(':') && !self.host.starts_with('[') {
			format!("[{}]:{}", self.host, self.port)
		} else {
			format!("{}:{}", self.host, self.port)
		}
	}
}
