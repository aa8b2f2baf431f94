use thiserror::Error;

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid environment variable {key}: {reason}")]
	InvalidEnv { key: String, reason: String },
}

/// Errors raised while building or validating [`Settings`](crate::Settings)
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("Failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		#[source]
		error: SourceError,
	},

	#[error("Settings do not match the expected shape: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error("Invalid setting `{key}`: {reason}")]
	Invalid { key: String, reason: String },
}

impl SettingsError {
	pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
		Self::Invalid {
			key: key.to_string(),
			reason: reason.into(),
		}
	}
}
