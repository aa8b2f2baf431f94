//! # userapi settings
//!
//! Layered configuration for userapi applications.
//!
//! Settings are merged from several sources in priority order (highest
//! wins):
//!
//! 1. Environment variables with the `USERAPI_` prefix
//! 2. A TOML file (`userapi.toml` by default)
//! 3. Built-in defaults
//!
//! ```rust,no_run
//! use userapi_conf::{Settings, SettingsBuilder, sources::{DefaultSource, EnvSource, TomlFileSource}};
//!
//! let settings: Settings = SettingsBuilder::new()
//!     .add_source(DefaultSource::from_settings(&Settings::default()).unwrap())
//!     .add_source(TomlFileSource::new("userapi.toml").optional())
//!     .add_source(EnvSource::new().with_prefix("USERAPI_"))
//!     .build()
//!     .unwrap()
//!     .into_typed()
//!     .unwrap();
//! ```

pub mod builder;
pub mod error;
pub mod settings;
pub mod sources;

pub use builder::{MergedSettings, SettingsBuilder};
pub use error::{SettingsError, SourceError};
pub use settings::{DEFAULT_CONFIG_FILE, ENV_PREFIX, Settings, UserConfig};
