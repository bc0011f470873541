//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite dataset location and pool sizing
//!
//! The dataset window settings live in the application layer
//! ([`application::DatasetConfig`]) and telemetry settings in
//! [`crate::telemetry`]; both are embedded here so one file configures
//! everything.

mod database;
mod server;

use std::fmt;
use std::path::Path;

use application::DatasetConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Prefix of environment variable overrides (`CLIMATE_SERVER__PORT=8080`)
pub const ENV_PREFIX: &str = "CLIMATE";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Production hides internal error details from HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details exposed
    #[default]
    Development,
    /// Production environment - generic error bodies only
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Debug mode: verbose logging and error details regardless of environment
    #[serde(default)]
    pub debug: bool,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Reference window settings
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config.toml")
    }

    /// Load configuration from the given file (optional) and environment
    ///
    /// Environment variables use the `CLIMATE_` prefix and `__` between
    /// nested keys, e.g. `CLIMATE_DATABASE__MAX_CONNECTIONS=8`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path.as_ref(), None)
    }

    /// Load from `path` with `env` standing in for the process environment
    /// when given
    fn load_with_env(
        path: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true)
                    .source(env),
            );

        builder.build()?.try_deserialize()
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<u16>, debug: bool) {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        if debug {
            self.debug = true;
            self.telemetry.log_filter = "debug".to_string();
        }
    }

    /// Whether internal error details may appear in HTTP responses
    pub fn expose_internal_errors(&self) -> bool {
        self.debug || self.environment == Environment::Development
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn environment_default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", Environment::Development), "development");
        assert_eq!(format!("{}", Environment::Production), "production");
    }

    #[test]
    fn environment_from_str() {
        assert_eq!(
            "prod".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "DEVELOPMENT".parse::<Environment>().unwrap(),
            Environment::Development
        );
        let err = "staging".parse::<Environment>().unwrap_err();
        assert!(err.contains("Invalid environment"));
    }

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.path, "Resources/hawaii.sqlite");
        assert_eq!(config.dataset.reference_date, "2017-08-23");
        assert!(!config.debug);
    }

    #[test]
    fn app_config_deserialization_fills_defaults() {
        let json = r#"{"server":{"port":8080},"environment":"production"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn server_bind_address() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn overrides_replace_host_and_port() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("0.0.0.0".to_string()), Some(8000), false);
        assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
        assert!(!config.debug);
    }

    #[test]
    fn debug_override_enables_verbose_logging() {
        let mut config = AppConfig::default();
        config.environment = Environment::Production;
        assert!(!config.expose_internal_errors());

        config.apply_overrides(None, None, true);

        assert!(config.debug);
        assert_eq!(config.telemetry.log_filter, "debug");
        assert!(config.expose_internal_errors());
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.dataset.window_days, 365);
    }

    #[test]
    fn load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climate.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
environment = "production"

[database]
path = "/data/hawaii.sqlite"

[dataset]
window_days = 30
"#
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database.path, "/data/hawaii.sqlite");
        assert_eq!(config.dataset.window_days, 30);
        assert_eq!(config.dataset.reference_date, "2017-08-23");
    }

    fn env(vars: &[(&str, &str)]) -> config::Map<String, String> {
        vars.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn env_overrides_nested_keys() {
        let dir = tempfile::tempdir().unwrap();
        let vars = env(&[
            ("CLIMATE_SERVER__PORT", "8080"),
            ("CLIMATE_DATABASE__MAX_CONNECTIONS", "8"),
            ("CLIMATE_DATASET__TRACK_LATEST_DATE", "true"),
            ("CLIMATE_ENVIRONMENT", "production"),
            ("OTHER_SERVER__PORT", "9999"),
        ]);

        let config =
            AppConfig::load_with_env(&dir.path().join("absent.toml"), Some(vars)).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 8);
        assert!(config.dataset.track_latest_date);
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn env_allowed_origins_split_on_commas() {
        let dir = tempfile::tempdir().unwrap();
        let vars = env(&[(
            "CLIMATE_SERVER__ALLOWED_ORIGINS",
            "http://localhost:3000,https://climate.example.org",
        )]);

        let config =
            AppConfig::load_with_env(&dir.path().join("absent.toml"), Some(vars)).unwrap();

        assert_eq!(
            config.server.allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://climate.example.org".to_string()
            ]
        );
    }

    #[test]
    fn env_overrides_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climate.toml");
        std::fs::write(&path, "[server]\nport = 7000\nhost = \"0.0.0.0\"\n").unwrap();
        let vars = env(&[("CLIMATE_SERVER__PORT", "7001")]);

        let config = AppConfig::load_with_env(&path, Some(vars)).unwrap();

        assert_eq!(config.server.port, 7001);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
