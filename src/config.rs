//! Configuration loading and constants.
//!
//! Loads the service configuration from an optional TOML file and defines the
//! fixed values of the health endpoint. Every field has a default, so the
//! service runs with no configuration at all and then listens on `0.0.0.0:80`.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Health Endpoint
// =============================================================================

/// Path of the liveness endpoint
pub const HEALTH_PATH: &str = "/v1/health";

/// Message returned by the liveness endpoint, byte-for-byte on every request
pub const HEALTH_MESSAGE: &str = "Hello from GoLang";

/// Liveness answers must never be served from an intermediate cache
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

/// Body for unmatched routes and methods
pub const NOT_FOUND_BODY: &str = "404 page not found";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default bind host (all interfaces)
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Default seconds to wait for in-flight requests after a shutdown signal
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path, used only when the file exists
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME"));

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Drain deadline once a shutdown signal arrives
    #[serde(default = "HttpServerConfig::default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_grace_secs: Self::default_shutdown_grace_secs(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_grace_secs() -> u64 {
        SHUTDOWN_GRACE_SECS
    }

    /// `host:port` in the form accepted by socket address parsing
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load an explicitly requested file, or fall back to the default path
    /// and finally to built-in defaults.
    ///
    /// An explicit path that cannot be read is an error; a missing
    /// `DEFAULT_CONFIG_PATH` is not.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_or_fallback(path, DEFAULT_CONFIG_PATH)
    }

    fn load_or_fallback<P: AsRef<Path>>(path: Option<&str>, fallback: P) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if fallback.as_ref().exists() => Self::load(fallback),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 80);
        assert_eq!(config.http.shutdown_grace_secs, SHUTDOWN_GRACE_SECS);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_partial_http_section() {
        let config: AppConfig = toml::from_str("[http]\nport = 8080\n").unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_json_log_format() {
        let config: AppConfig = toml::from_str("[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[logging]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_port_out_of_range_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[http]\nport = 70000\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nhost = \"127.0.0.1\"\nport = 3001").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.bind_address(), "127.0.0.1:3001");
    }

    #[test]
    fn test_load_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http\nport = ").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = AppConfig::load_or_default(missing.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_fallback_file_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("default.toml");
        std::fs::write(&fallback, "[http]\nport = 9090\nshutdown_grace_secs = 5\n").unwrap();

        let config = AppConfig::load_or_fallback(None, &fallback).unwrap();
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.http.shutdown_grace_secs, 5);
    }

    #[test]
    fn test_builtin_defaults_when_fallback_absent() {
        let dir = tempfile::tempdir().unwrap();

        let config = AppConfig::load_or_fallback(None, dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.http.bind_address(), "0.0.0.0:80");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_explicit_path_wins_over_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("default.toml");
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&fallback, "[http]\nport = 9090\n").unwrap();
        std::fs::write(&explicit, "[http]\nport = 9191\n").unwrap();

        let config = AppConfig::load_or_fallback(explicit.to_str(), &fallback).unwrap();
        assert_eq!(config.http.port, 9191);
    }

    #[test]
    fn test_shipped_default_config_parses() {
        let config = AppConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml")).unwrap();
        assert_eq!(config.http.bind_address(), "0.0.0.0:80");
    }

    #[test]
    fn test_default_log_filter_names_crate() {
        assert_eq!(DEFAULT_LOG_FILTER, "pulse=info,tower_http=info");
    }
}
