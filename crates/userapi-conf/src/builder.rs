//! Merges configuration sources into one settings value.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::SettingsError;
use crate::sources::ConfigSource;

/// Collects sources and merges them by priority
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self {
			sources: Vec::new(),
		}
	}

	/// Add a configuration source
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Load every source and merge them
	///
	/// Sources are applied from lowest to highest priority; for equal
	/// priorities the one added later wins. Merging is per top-level key.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Source`] naming the first source that failed to load.
	pub fn build(mut self) -> Result<MergedSettings, SettingsError> {
		self.sources.sort_by_key(|s| s.priority());

		let mut values = Map::new();
		for source in &self.sources {
			let loaded = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(source = %source.description(), keys = loaded.len(), "loaded settings source");
			values.extend(loaded);
		}

		Ok(MergedSettings { values })
	}
}

impl Default for SettingsBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Result of merging all sources, before conversion to a typed struct
#[derive(Debug, Clone)]
pub struct MergedSettings {
	values: Map<String, Value>,
}

impl MergedSettings {
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.values.get(key)
	}

	/// Deserialize the merged values into `T`
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Deserialize`] if a value has the wrong type.
	pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, SettingsError> {
		Ok(serde_json::from_value(Value::Object(self.values))?)
	}
}
