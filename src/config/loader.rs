//! Configuration loader for userbase-rs
//!
//! Resolves the configuration sources (layered directory or a single file),
//! stacks them with environment overrides on top and deserializes the result
//! into [`Settings`].

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
pub const CONFIG_DIR_ENV: &str = "USERBASE_CONFIG_DIR";

/// Environment variable for specific configuration file
pub const CONFIG_FILE_ENV: &str = "USERBASE_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix of override variables, e.g. `USERBASE_DATABASE__PASSWORD`
const ENV_PREFIX: &str = "USERBASE";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Where the file-based part of the configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    /// `default.toml`, `{env}.toml`, `local.toml` inside a directory
    Layered(PathBuf),
    /// One explicit file, no layering
    SingleFile(PathBuf),
}

/// Configuration loader that handles layered configuration loading
///
/// Sources in order of priority (lowest first):
/// 1. `default.toml` (required)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `USERBASE_*` environment variables
#[derive(Debug)]
pub struct ConfigLoader {
    source: Source,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `USERBASE_CONFIG_DIR`, `USERBASE_CONFIG_FILE`
    /// and `USERBASE_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `USERBASE_CONFIG_DIR` and `USERBASE_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok();

        let source = match (config_dir, config_file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::mutual_exclusivity(format!(
                    "{} and {} cannot both be set. Use {} for layered configuration or {} for a single configuration file.",
                    CONFIG_DIR_ENV, CONFIG_FILE_ENV, CONFIG_DIR_ENV, CONFIG_FILE_ENV
                )));
            }
            (None, Some(file)) => Source::SingleFile(PathBuf::from(file)),
            (Some(dir), None) => Source::Layered(PathBuf::from(dir)),
            (None, None) => Source::Layered(PathBuf::from(DEFAULT_CONFIG_DIR)),
        };

        Ok(Self {
            source,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Create a loader reading a single file, still honouring env overrides.
    pub fn for_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            source: Source::SingleFile(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Replace the environment used to pick the overlay file.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load, deserialize and validate the configuration.
    ///
    /// # Errors
    ///
    /// - `default.toml` (or the single file) is missing
    /// - A source fails to parse or deserialize
    /// - The resulting settings fail validation
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match &self.source {
            Source::SingleFile(path) => add_file(Config::builder(), path, true)?,
            Source::Layered(dir) => {
                let builder = add_file(Config::builder(), &dir.join("default.toml"), true)?;
                let builder = add_file(builder, &dir.join(self.environment.overlay_file()), false)?;
                add_file(builder, &dir.join("local.toml"), false)?
            }
        };

        // USERBASE_SERVER__PORT -> server.port
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }
}

fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    let name = path.to_str().ok_or_else(|| {
        ConfigError::ParseError(format!("Non UTF-8 configuration path: {}", path.display()))
    })?;
    Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
}
