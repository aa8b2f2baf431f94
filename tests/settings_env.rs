//! Application factory behaviour driven by settings files and environment variables.

use rstest::*;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;
use userapi::views::User;
use userapi::{Error, ResponseExt, Settings, create_app, create_app_with_settings};

struct EnvGuard(&'static str);

impl EnvGuard {
	fn set(key: &'static str, value: &str) -> Self {
		// SAFETY: every test in this file runs under #[serial]
		unsafe { std::env::set_var(key, value) };
		Self(key)
	}
}

impl Drop for EnvGuard {
	fn drop(&mut self) {
		// SAFETY: see EnvGuard::set
		unsafe { std::env::remove_var(self.0) };
	}
}

#[rstest]
#[serial(userapi_env)]
fn test_invalid_env_setting_fails_factory() {
	let _guard = EnvGuard::set("USERAPI_LOG_LEVEL", "loud");

	let err = create_app().err().unwrap();
	assert!(matches!(err, Error::Configuration(_)));
	assert!(err.to_string().contains("log_level"));
}

#[rstest]
#[serial(userapi_env)]
fn test_unparsable_env_setting_fails_factory() {
	let _guard = EnvGuard::set("USERAPI_DEBUG", "sometimes");

	let err = create_app().err().unwrap();
	assert!(matches!(err, Error::Configuration(_)));
}

#[rstest]
#[serial(userapi_env)]
fn test_env_settings_reach_application() {
	let _guard = EnvGuard::set("USERAPI_PORT", "9300");

	let app = create_app().unwrap();
	assert_eq!(app.settings().port, 9300);
}

#[rstest]
#[serial(userapi_env)]
#[tokio::test]
async fn test_users_from_config_file_are_listed() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("userapi.toml");
	fs::write(
		&path,
		r#"
[[users]]
id = 7
username = "carol"
"#,
	)
	.unwrap();

	let settings = Settings::load(Some(&path)).unwrap();
	let client = create_app_with_settings(settings).unwrap().test_client();

	let users: Vec<User> = client.get("/users/").await.unwrap().assert_ok().json().unwrap();
	assert_eq!(
		users,
		vec![User {
			id: 7,
			username: "carol".to_string()
		}]
	);
}
