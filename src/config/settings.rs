//! Configuration settings structures for userbase-rs
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "userbase-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3333
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "empty".to_string()
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/app.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// PostgreSQL connection configuration.
///
/// Either set `url` directly or leave it empty and fill in the individual
/// parts, which are rendered as a libpq-style `key=value` string.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; takes precedence over the parts below when set,
    /// including `ssl_mode` (use the URL's `sslmode` parameter instead)
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    /// Database name
    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default = "default_db_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    /// "disable" or "prefer"; connections are plain TCP, so modes that
    /// demand TLS are rejected
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections kept in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl DatabaseConfig {
    /// Connection string handed to the driver.
    pub fn connection_string(&self) -> String {
        if !self.url.is_empty() {
            return self.url.clone();
        }

        let mut parts = vec![
            format!("host={}", quote_conninfo_value(&self.host)),
            format!("port={}", self.port),
            format!("dbname={}", quote_conninfo_value(&self.name)),
            format!("user={}", quote_conninfo_value(&self.user)),
        ];
        if !self.password.is_empty() {
            parts.push(format!("password={}", quote_conninfo_value(&self.password)));
        }
        parts.push(format!("sslmode={}", self.ssl_mode));
        parts.join(" ")
    }

    /// Where the pool points, with no credentials, for log lines.
    pub fn target_description(&self) -> String {
        if !self.url.is_empty() {
            let without_scheme = self.url.split("://").nth(1).unwrap_or(&self.url);
            let host_part = without_scheme.rsplit('@').next().unwrap_or(without_scheme);
            return host_part.split('?').next().unwrap_or(host_part).to_string();
        }
        format!("{}:{}/{}", self.host, self.port, self.name)
    }
}

/// Quotes a conninfo value when it contains characters libpq treats specially.
fn quote_conninfo_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("target", &self.target_description())
            .field("user", &self.user)
            .field("password_set", &!self.password.is_empty())
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            user: default_db_user(),
            password: String::new(),
            ssl_mode: default_ssl_mode(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    /// Append to an existing file instead of truncating it
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings as they appear in the TOML files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level or full `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let config = LoggerConfig {
            level: self.level,
            console: self.console.into_console_config(),
            file: self.file.into_file_config()?,
        };
        config
            .validate()
            .map_err(|e| ConfigError::validation("logger".to_string(), e.to_string()))?;
        Ok(config)
    }
}

impl ConsoleSettings {
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig {
            enabled: self.enabled,
            colored: self.colored,
        }
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format: LogFormat = self.format.parse().map_err(|_| {
            ConfigError::validation(
                "logger.file.format".to_string(),
                format!(
                    "Invalid log format '{}'. Valid formats are: full, compact, json",
                    self.format
                ),
            )
        })?;

        Ok(FileConfig {
            enabled: self.enabled,
            path: PathBuf::from(self.path),
            append: self.append,
            format,
        })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3333);
        assert_eq!(config.address(), "127.0.0.1:3333");
    }

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::default();
        assert!(config.url.is_empty());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.name, "empty");
        assert_eq!(config.user, "postgres");
        assert!(config.password.is_empty());
        assert_eq!(config.ssl_mode, "disable");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
    }

    #[test]
    fn test_connection_string_from_parts() {
        let mut config = DatabaseConfig::default();
        config.password = "123456".to_string();
        assert_eq!(
            config.connection_string(),
            "host=localhost port=5432 dbname=empty user=postgres password=123456 sslmode=disable"
        );
    }

    #[test]
    fn test_connection_string_omits_empty_password() {
        let config = DatabaseConfig::default();
        assert!(!config.connection_string().contains("password="));
    }

    #[test]
    fn test_connection_string_quotes_special_values() {
        let mut config = DatabaseConfig::default();
        config.password = "it's a secret".to_string();
        assert!(config
            .connection_string()
            .contains("password='it\\'s a secret'"));
    }

    #[test]
    fn test_connection_string_prefers_url() {
        let mut config = DatabaseConfig::default();
        config.url = "postgres://app:pw@db.internal:5433/users".to_string();
        config.password = "ignored".to_string();
        assert_eq!(
            config.connection_string(),
            "postgres://app:pw@db.internal:5433/users"
        );
    }

    #[test]
    fn test_target_description_hides_credentials() {
        let mut config = DatabaseConfig::default();
        config.url = "postgres://app:pw@db.internal:5433/users?sslmode=disable".to_string();
        assert_eq!(config.target_description(), "db.internal:5433/users");

        let config = DatabaseConfig::default();
        assert_eq!(config.target_description(), "localhost:5432/empty");
    }

    #[test]
    fn test_database_debug_does_not_print_password() {
        let mut config = DatabaseConfig::default();
        config.password = "hunter2".to_string();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("password_set: true"));
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml_str = r#"
            [server]
            port = 8080

            [database]
            name = "users"
            password = "pw"
        "#;
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.database.name, "users");
        assert_eq!(settings.database.host, "localhost");
        assert_eq!(settings.logger.level, "info");
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let mut settings = LoggerSettings::default();
        settings.file.enabled = true;
        settings.file.format = "compact".to_string();

        let config = settings.into_logger_config().unwrap();
        assert!(config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Compact);
        assert_eq!(config.file.path, PathBuf::from("logs/app.log"));
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let mut settings = LoggerSettings::default();
        settings.file.format = "xml".to_string();

        let err = settings.into_logger_config().unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "logger.file.format"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_logger_settings_both_outputs_disabled() {
        let mut settings = LoggerSettings::default();
        settings.console.enabled = false;
        settings.file.enabled = false;

        assert!(settings.into_logger_config().is_err());
    }

    proptest! {
        #[test]
        fn prop_plain_values_are_not_quoted(password in "[A-Za-z0-9]{1,32}") {
            let mut config = DatabaseConfig::default();
            config.password = password.clone();
            let expected = format!("password={}", password);
            prop_assert!(config.connection_string().contains(&expected));
        }

        #[test]
        fn prop_address_joins_host_and_port(port in 1u16..) {
            let config = ServerConfig { host: "0.0.0.0".to_string(), port };
            prop_assert_eq!(config.address(), format!("0.0.0.0:{}", port));
        }
    }
}
