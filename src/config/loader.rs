//! Configuration Loader
//!
//! Environment-aware loading: compiled defaults, then the base TOML file,
//! then the per-environment overlay, then `PRODUCTION_TRACKER__*` variables.

use super::error::{ConfigResult, ConfigurationError};
use super::TrackerConfig;
use config::{Config, Environment, File};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const BASE_FILE: &str = "production-tracker.toml";
const ENV_PREFIX: &str = "PRODUCTION_TRACKER";

pub struct ConfigManager {
    config: TrackerConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment.
    /// Useful for testing without modifying global environment variables.
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));

        if config_directory.exists() && !config_directory.is_dir() {
            return Err(ConfigurationError::NotADirectory {
                path: config_directory,
            });
        }

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::load_and_merge_config(&config_directory, environment)?;
        config.validate()?;

        info!(
            environment = %environment,
            database_url = %config.database.sanitized_url(),
            leaderboard_size = config.dashboard.leaderboard_size,
            lagging_ratio = config.dashboard.lagging_ratio,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Wrap an already-built configuration, e.g. in tests
    pub fn from_config(config: TrackerConfig, environment: &str) -> ConfigResult<Arc<ConfigManager>> {
        config.validate()?;
        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory: PathBuf::from("config"),
        }))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Detect the current environment from environment variables
    pub fn detect_environment() -> String {
        env::var("PRODUCTION_TRACKER_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }

    fn load_and_merge_config(directory: &Path, environment: &str) -> ConfigResult<TrackerConfig> {
        let defaults = Config::try_from(&TrackerConfig::default())
            .map_err(|e| ConfigurationError::load_error(environment, e))?;

        let overlay = directory
            .join("environments")
            .join(format!("{environment}.toml"));

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(directory.join(BASE_FILE)).required(false))
            .add_source(File::from(overlay).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|merged| merged.try_deserialize::<TrackerConfig>())
            .map_err(|e| ConfigurationError::load_error(environment, e))
    }
}
