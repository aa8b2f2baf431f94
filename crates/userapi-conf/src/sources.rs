//! Configuration sources for the layered settings system
//!
//! Each source yields a flat map of top-level keys. The builder merges them
//! in priority order (environment variables > config files > defaults).

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

use crate::error::SourceError;

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<Map<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Built-in default values
#[derive(Default)]
pub struct DefaultSource {
	values: Map<String, Value>,
}

impl DefaultSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a single default value
	///
	/// # Examples
	///
	/// ```
	/// use userapi_conf::sources::{ConfigSource, DefaultSource};
	/// use serde_json::Value;
	///
	/// let source = DefaultSource::new().with_value("debug", Value::Bool(true));
	/// assert_eq!(source.load().unwrap()["debug"], Value::Bool(true));
	/// ```
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}

	/// Use every field of a serializable struct as a default
	///
	/// # Errors
	///
	/// Returns [`SourceError::Json`] if `defaults` does not serialize to a JSON object.
	pub fn from_settings<T: Serialize>(defaults: &T) -> Result<Self, SourceError> {
		let values = match serde_json::to_value(defaults)? {
			Value::Object(map) => map,
			other => {
				return Err(SourceError::Json(serde::de::Error::custom(format!(
					"defaults must serialize to an object, got {}",
					other
				))));
			}
		};
		Ok(Self { values })
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"default values".to_string()
	}
}

/// TOML configuration file
pub struct TomlFileSource {
	path: PathBuf,
	required: bool,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: true,
		}
	}

	/// Treat a missing file as an empty source instead of an error
	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		if !self.required && !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "optional config file not found");
			return Ok(Map::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let table: toml::Table = toml::from_str(&content)?;
		match serde_json::to_value(table)? {
			Value::Object(map) => Ok(map),
			_ => Ok(Map::new()),
		}
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Keys read verbatim from the environment, even when the value looks like JSON
const STRING_KEYS: &[&str] = &["host", "log_level"];

/// Environment variable configuration source
///
/// With a prefix, only matching variables are read and the prefix is
/// stripped. Keys are lowercased, so `USERAPI_LOG_LEVEL` becomes `log_level`.
#[derive(Default)]
pub struct EnvSource {
	prefix: Option<String>,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a prefix filter for environment variables
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Read from the given pairs instead of the process environment
	///
	/// # Examples
	///
	/// ```
	/// use userapi_conf::sources::{ConfigSource, EnvSource};
	/// use serde_json::json;
	///
	/// let source = EnvSource::new()
	///     .with_prefix("USERAPI_")
	///     .with_vars([("USERAPI_PORT", "9000"), ("USERAPI_DEBUG", "off"), ("HOME", "/root")]);
	/// let values = source.load().unwrap();
	/// assert_eq!(values["port"], json!(9000));
	/// assert_eq!(values["debug"], json!(false));
	/// assert!(!values.contains_key("home"));
	/// ```
	pub fn with_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		self.vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
		self
	}

	fn parse_value(key: &str, raw: &str) -> Result<Value, SourceError> {
		if key == "debug" {
			return match raw.trim().to_lowercase().as_str() {
				"true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
				"false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
				other => Err(SourceError::InvalidEnv {
					key: key.to_string(),
					reason: format!("expected a boolean, got `{}`", other),
				}),
			};
		}

		if STRING_KEYS.contains(&key) {
			return Ok(Value::String(raw.to_string()));
		}

		// Numbers, booleans and JSON arrays/objects keep their type; anything
		// else is taken as a plain string.
		match serde_json::from_str::<Value>(raw) {
			Ok(value @ (Value::Number(_) | Value::Bool(_) | Value::Array(_) | Value::Object(_))) => {
				Ok(value)
			}
			_ => Ok(Value::String(raw.to_string())),
		}
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		let vars = match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		};

		let mut config = Map::new();
		for (key, value) in vars {
			let clean_key = match &self.prefix {
				Some(prefix) => match key.strip_prefix(prefix.as_str()) {
					Some(stripped) => stripped,
					None => continue,
				},
				None => key.as_str(),
			};
			let lower_key = clean_key.to_lowercase();
			let parsed = Self::parse_value(&lower_key, &value)?;
			config.insert(lower_key, parsed);
		}
		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		match &self.prefix {
			Some(prefix) => format!("environment variables ({}*)", prefix),
			None => "environment variables".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[rstest]
	fn test_toml_source_reads_table() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "port = 9000\nhost = \"0.0.0.0\"\n[[users]]\nid = 1\nusername = \"alice\"").unwrap();

		let values = TomlFileSource::new(file.path()).load().unwrap();
		assert_eq!(values["port"], json!(9000));
		assert_eq!(values["host"], json!("0.0.0.0"));
		assert_eq!(values["users"], json!([{"id": 1, "username": "alice"}]));
	}

	#[rstest]
	fn test_missing_required_toml_is_error() {
		let err = TomlFileSource::new("/definitely/not/here.toml")
			.load()
			.unwrap_err();
		assert!(matches!(err, SourceError::Io(_)));
	}

	#[rstest]
	fn test_missing_optional_toml_is_empty() {
		let values = TomlFileSource::new("/definitely/not/here.toml")
			.optional()
			.load()
			.unwrap();
		assert!(values.is_empty());
	}

	#[rstest]
	fn test_invalid_toml_is_error() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "port = = 1").unwrap();
		let err = TomlFileSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, SourceError::Toml(_)));
	}

	#[rstest]
	#[case("USERAPI_HOST", "127.0.0.1", "host", json!("127.0.0.1"))]
	#[case("USERAPI_HOST", "10", "host", json!("10"))]
	#[case("USERAPI_LOG_LEVEL", "debug", "log_level", json!("debug"))]
	#[case("USERAPI_LOG_LEVEL", "true", "log_level", json!("true"))]
	#[case("USERAPI_PORT", "9000", "port", json!(9000))]
	#[case("USERAPI_DEBUG", "yes", "debug", json!(true))]
	#[case("USERAPI_USERS", r#"[{"id":2,"username":"bob"}]"#, "users", json!([{"id": 2, "username": "bob"}]))]
	fn test_env_value_parsing(
		#[case] var: &str,
		#[case] raw: &str,
		#[case] key: &str,
		#[case] expected: Value,
	) {
		let values = EnvSource::new()
			.with_prefix("USERAPI_")
			.with_vars([(var, raw)])
			.load()
			.unwrap();
		assert_eq!(values[key], expected);
	}

	#[rstest]
	fn test_env_rejects_bad_debug_flag() {
		let err = EnvSource::new()
			.with_prefix("USERAPI_")
			.with_vars([("USERAPI_DEBUG", "maybe")])
			.load()
			.unwrap_err();
		assert!(matches!(err, SourceError::InvalidEnv { .. }));
	}

	#[rstest]
	fn test_default_source_rejects_non_object() {
		assert!(DefaultSource::from_settings(&42).is_err());
	}
}
