//! Configuration validation logic
//!
//! Range and format checks run after every load and after CLI overrides.

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, LoggerSettings, ServerConfig, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// SSL modes that work over the pool's plain TCP (NoTls) connections
const VALID_SSL_MODES: &[&str] = &["disable", "prefer"];

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host must not be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - A non-empty URL must use the postgres:// or postgresql:// scheme
    /// - Without a URL, host, name and user are required
    /// - SSL mode must be disable or prefer; with a URL the `sslmode` query
    ///   parameter is checked instead and `ssl_mode` is ignored
    /// - Pool bounds must be positive with min <= max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.is_empty() {
            if !(self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")) {
                return Err(ConfigError::validation(
                    "database.url",
                    "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
                ));
            }

            if let Some(mode) = url_ssl_mode(&self.url)
                && !VALID_SSL_MODES.contains(&mode)
            {
                return Err(ConfigError::ValidationError {
                    field: "database.url".to_string(),
                    message: format!(
                        "Unsupported sslmode '{}' in URL; TLS is not enabled. Valid modes are: {}",
                        mode,
                        VALID_SSL_MODES.join(", ")
                    ),
                });
            }
        } else {
            if !VALID_SSL_MODES.contains(&self.ssl_mode.as_str()) {
                return Err(ConfigError::ValidationError {
                    field: "database.ssl_mode".to_string(),
                    message: format!(
                        "Invalid SSL mode '{}'; TLS is not enabled. Valid modes are: {}",
                        self.ssl_mode,
                        VALID_SSL_MODES.join(", ")
                    ),
                });
            }

            for (field, value) in [
                ("database.host", &self.host),
                ("database.name", &self.name),
                ("database.user", &self.user),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::ValidationError {
                        field: field.to_string(),
                        message: "Required when database.url is not set.".to_string(),
                    });
                }
            }

            if self.port == 0 {
                return Err(ConfigError::validation(
                    "database.port",
                    "Port must be between 1 and 65535.",
                ));
            }
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

/// Value of the `sslmode` query parameter of a connection URL, if present.
fn url_ssl_mode(url: &str) -> Option<&str> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "sslmode")
        .map(|(_, value)| value)
}

impl LoggerSettings {
    /// Validate logger configuration
    ///
    /// `level` may be a full `EnvFilter` directive such as
    /// `info,userbase_rs=debug`; only the leading global level is checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let global = self
            .level
            .split(',')
            .find(|directive| !directive.contains('='))
            .unwrap_or("info")
            .trim()
            .to_lowercase();
        if !VALID_LOG_LEVELS.contains(&global.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled {
            if self.file.path.trim().is_empty() {
                return Err(ConfigError::validation(
                    "logger.file.path",
                    "File path cannot be empty when file output is enabled.",
                ));
            }

            if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
                return Err(ConfigError::ValidationError {
                    field: "logger.file.format".to_string(),
                    message: format!(
                        "Invalid log format '{}'. Valid formats are: {}",
                        self.file.format,
                        VALID_LOG_FORMATS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Settings {
    /// Validate every section, stopping at the first failure
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
