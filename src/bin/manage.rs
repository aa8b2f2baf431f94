//! userapi management command interface (equivalent to Django's manage.py).

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use userapi::{Settings, create_app_with_settings};

#[derive(Parser)]
#[command(name = "manage")]
#[command(about = "userapi management interface", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Verbosity level (can be repeated for more output)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Start the HTTP server
	Runserver {
		/// Interface to bind (overrides settings)
		#[arg(long, value_name = "HOST")]
		host: Option<String>,

		/// Port to bind (overrides settings)
		#[arg(short, long, value_name = "PORT")]
		port: Option<u16>,

		/// Settings file (defaults to ./userapi.toml when present)
		#[arg(short, long, value_name = "FILE")]
		config: Option<PathBuf>,
	},

	/// Load settings, build the application and report problems
	Check {
		/// Settings file (defaults to ./userapi.toml when present)
		#[arg(short, long, value_name = "FILE")]
		config: Option<PathBuf>,
	},
}

type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();

	let result = match cli.command {
		Commands::Runserver { host, port, config } => {
			runserver(config.as_deref(), host, port, cli.verbosity).await
		}
		Commands::Check { config } => check(config.as_deref(), cli.verbosity),
	};

	if let Err(err) = result {
		eprintln!("Error: {}", err);
		process::exit(1);
	}
}

/// Load settings from `config` and the environment, then apply command-line overrides
fn resolve_settings(
	config: Option<&Path>,
	host: Option<String>,
	port: Option<u16>,
) -> Result<Settings, Box<dyn std::error::Error>> {
	let mut settings = Settings::load(config)?;
	if let Some(host) = host {
		settings.host = host;
	}
	if let Some(port) = port {
		settings.port = port;
	}
	settings.validate()?;
	Ok(settings)
}

/// Log filter for the configured level; `-v` means debug, `-vv` and up trace.
fn log_filter(configured: &str, verbosity: u8) -> &str {
	match verbosity {
		0 => configured,
		1 => "debug",
		_ => "trace",
	}
}

/// `RUST_LOG` wins over `filter`.
fn init_logging(filter: &str) {
	let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).try_init();
}

/// One line per registered route: name, path and allowed methods
fn route_report(settings: Settings) -> Result<Vec<String>, Box<dyn std::error::Error>> {
	let app = create_app_with_settings(settings)?;
	Ok(app
		.router()
		.routes()
		.iter()
		.map(|route| {
			format!(
				"{:<12} {} [{}]",
				route.full_name().unwrap_or_default(),
				route.path,
				route.allowed_methods().join(", ")
			)
		})
		.collect())
}

#[cfg(feature = "server")]
async fn runserver(
	config: Option<&Path>,
	host: Option<String>,
	port: Option<u16>,
	verbosity: u8,
) -> CommandResult {
	let settings = resolve_settings(config, host, port)?;
	init_logging(log_filter(&settings.log_level, verbosity));

	let addr: std::net::SocketAddr = settings.bind_address().parse()?;
	let app = create_app_with_settings(settings)?;

	println!("Starting development server at http://{}/", addr);
	println!("Quit the server with CONTROL-C.");

	userapi::serve(addr, app.handler()).await?;
	Ok(())
}

#[cfg(not(feature = "server"))]
async fn runserver(
	_config: Option<&Path>,
	_host: Option<String>,
	_port: Option<u16>,
	_verbosity: u8,
) -> CommandResult {
	Err("runserver requires the `server` feature".into())
}

fn check(config: Option<&Path>, verbosity: u8) -> CommandResult {
	let settings = resolve_settings(config, None, None)?;
	init_logging(log_filter(&settings.log_level, verbosity));

	for line in route_report(settings)? {
		println!("{}", line);
	}
	println!("System check identified no issues.");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;
	use std::fs;
	use tempfile::TempDir;

	#[fixture]
	fn temp_dir() -> TempDir {
		TempDir::new().expect("Failed to create temporary directory")
	}

	fn write_config(dir: &TempDir, content: &str) -> PathBuf {
		let path = dir.path().join("userapi.toml");
		fs::write(&path, content).expect("Failed to write config");
		path
	}

	#[rstest]
	#[case("info", 0, "info")]
	#[case("warn", 0, "warn")]
	#[case("info", 1, "debug")]
	#[case("info", 2, "trace")]
	#[case("error", 5, "trace")]
	fn test_log_filter(#[case] configured: &str, #[case] verbosity: u8, #[case] expected: &str) {
		assert_eq!(log_filter(configured, verbosity), expected);
	}

	#[rstest]
	fn test_file_values_without_overrides(temp_dir: TempDir) {
		let path = write_config(&temp_dir, "host = \"0.0.0.0\"\nport = 9100\n");
		let settings = resolve_settings(Some(&path), None, None).unwrap();
		assert_eq!(settings.bind_address(), "0.0.0.0:9100");
	}

	#[rstest]
	fn test_host_and_port_override_file(temp_dir: TempDir) {
		let path = write_config(&temp_dir, "host = \"0.0.0.0\"\nport = 9100\n");
		let settings =
			resolve_settings(Some(&path), Some("::1".to_string()), Some(9200)).unwrap();

		assert_eq!(settings.host, "::1");
		assert_eq!(settings.port, 9200);
		let addr: std::net::SocketAddr = settings.bind_address().parse().unwrap();
		assert_eq!(addr.port(), 9200);
		assert!(addr.is_ipv6());
	}

	#[rstest]
	fn test_empty_host_override_is_rejected(temp_dir: TempDir) {
		let path = write_config(&temp_dir, "");
		let err = resolve_settings(Some(&path), Some(" ".to_string()), None).unwrap_err();
		assert!(err.to_string().contains("host"));
	}

	#[rstest]
	fn test_route_report_lists_users_route() {
		let lines = route_report(Settings::default()).unwrap();
		assert_eq!(lines.len(), 1);
		assert!(lines[0].starts_with("users:list"));
		assert!(lines[0].ends_with("/users/ [GET, HEAD]"));
	}

	#[rstest]
	fn test_check_succeeds_with_valid_file(temp_dir: TempDir) {
		let path = write_config(&temp_dir, "[[users]]\nid = 1\nusername = \"alice\"\n");
		assert!(check(Some(&path), 0).is_ok());
	}

	#[rstest]
	#[case("port = = 1\n")]
	#[case("[[users]]\nid = 1\nusername = \"a\"\n[[users]]\nid = 1\nusername = \"b\"\n")]
	fn test_check_fails_on_bad_file(temp_dir: TempDir, #[case] content: &str) {
		let path = write_config(&temp_dir, content);
		assert!(check(Some(&path), 0).is_err());
	}

	#[rstest]
	fn test_check_fails_on_missing_file(temp_dir: TempDir) {
		let path = temp_dir.path().join("absent.toml");
		assert!(check(Some(&path), 0).is_err());
	}

	#[rstest]
	fn test_runserver_arguments_parse() {
		let cli = Cli::try_parse_from([
			"manage", "-vv", "runserver", "--host", "::1", "-p", "9000", "--config", "dev.toml",
		])
		.unwrap();

		assert_eq!(cli.verbosity, 2);
		match cli.command {
			Commands::Runserver { host, port, config } => {
				assert_eq!(host.as_deref(), Some("::1"));
				assert_eq!(port, Some(9000));
				assert_eq!(config, Some(PathBuf::from("dev.toml")));
			}
			Commands::Check { .. } => panic!("expected runserver"),
		}
	}

	#[rstest]
	fn test_invalid_port_argument_is_rejected() {
		assert!(Cli::try_parse_from(["manage", "runserver", "--port", "http"]).is_err());
	}
}
