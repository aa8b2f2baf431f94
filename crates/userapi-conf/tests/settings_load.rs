//! Integration tests for loading settings from files and the environment.

use rstest::*;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;
use userapi_conf::{Settings, SettingsError, UserConfig};

/// Fixture providing temporary directory for test configuration files
#[fixture]
fn temp_dir() -> TempDir {
	TempDir::new().expect("Failed to create temporary directory")
}

struct EnvGuard(&'static [&'static str]);

impl Drop for EnvGuard {
	fn drop(&mut self) {
		for key in self.0 {
			// SAFETY: tests touching the environment run under #[serial]
			unsafe { std::env::remove_var(key) };
		}
	}
}

#[rstest]
#[serial(userapi_env)]
fn test_file_overrides_defaults(temp_dir: TempDir) {
	let path = temp_dir.path().join("userapi.toml");
	fs::write(
		&path,
		r#"
port = 9100
log_level = "debug"

[[users]]
id = 1
username = "alice"
"#,
	)
	.expect("Failed to write config");

	let settings = Settings::load(Some(&path)).expect("settings should load");
	assert_eq!(settings.port, 9100);
	assert_eq!(settings.log_level, "debug");
	assert_eq!(settings.host, "127.0.0.1");
	assert_eq!(
		settings.users,
		vec![UserConfig {
			id: 1,
			username: "alice".to_string()
		}]
	);
}

#[rstest]
#[serial(userapi_env)]
fn test_env_overrides_file(temp_dir: TempDir) {
	let path = temp_dir.path().join("userapi.toml");
	fs::write(&path, "port = 9100\n").expect("Failed to write config");

	let _guard = EnvGuard(&["USERAPI_PORT", "USERAPI_DEBUG"]);
	// SAFETY: serialized with the other environment tests
	unsafe {
		std::env::set_var("USERAPI_PORT", "9200");
		std::env::set_var("USERAPI_DEBUG", "true");
	}

	let settings = Settings::load(Some(&path)).expect("settings should load");
	assert_eq!(settings.port, 9200);
	assert!(settings.debug);
}

#[rstest]
#[serial(userapi_env)]
fn test_explicit_missing_file_is_error(temp_dir: TempDir) {
	let path = temp_dir.path().join("absent.toml");
	let err = Settings::load(Some(&path)).unwrap_err();
	assert!(matches!(err, SettingsError::Source { .. }));
}

#[rstest]
#[serial(userapi_env)]
fn test_duplicate_user_ids_fail_validation(temp_dir: TempDir) {
	let path = temp_dir.path().join("userapi.toml");
	fs::write(
		&path,
		r#"
[[users]]
id = 1
username = "alice"

[[users]]
id = 1
username = "bob"
"#,
	)
	.expect("Failed to write config");

	let err = Settings::load(Some(&path)).unwrap_err();
	assert_eq!(err.to_string(), "Invalid setting `users`: duplicate user id 1");
}

#[rstest]
#[serial(userapi_env)]
fn test_wrong_type_in_file(temp_dir: TempDir) {
	let path = temp_dir.path().join("userapi.toml");
	fs::write(&path, "port = \"eighty\"\n").expect("Failed to write config");

	let err = Settings::load(Some(&path)).unwrap_err();
	assert!(matches!(err, SettingsError::Deserialize(_)));
}

#[rstest]
#[serial(userapi_env)]
fn test_numeric_looking_host_from_env_stays_string(temp_dir: TempDir) {
	let path = temp_dir.path().join("userapi.toml");
	fs::write(&path, "").expect("Failed to write config");

	let _guard = EnvGuard(&["USERAPI_HOST"]);
	// SAFETY: serialized with the other environment tests
	unsafe { std::env::set_var("USERAPI_HOST", "10") };

	let settings = Settings::load(Some(&path)).expect("settings should load");
	assert_eq!(settings.host, "10");
}
