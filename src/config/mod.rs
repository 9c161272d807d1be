//! # Tracker Configuration
//!
//! Settings for the batch repository connection and the dashboard thresholds.
//!
//! ## Sources
//!
//! Layered by [`ConfigManager`], later sources win:
//!
//! 1. Compiled-in defaults ([`TrackerConfig::default`])
//! 2. `config/production-tracker.toml`
//! 3. `config/environments/<environment>.toml`
//! 4. Environment variables, e.g. `PRODUCTION_TRACKER__DASHBOARD__LEADERBOARD_SIZE=5`
//!
//! Every file is optional, so a bare checkout runs on defaults.
//!
//! ```rust,no_run
//! use uniform_production::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let leaderboard_size = manager.config().dashboard.leaderboard_size;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::thresholds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure mirroring production-tracker.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Connection settings for the batch repository
    pub database: DatabaseConfig,

    /// Thresholds used by the dashboard aggregation
    pub dashboard: DashboardSettings,
}

/// Database connection and pooling configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/uniform_production_development".to_string(),
            max_connections: 5,
            acquire_timeout_seconds: 10,
        }
    }
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }

    /// Connection URL with any password replaced, safe for logs.
    pub fn sanitized_url(&self) -> String {
        let Some(scheme_end) = self.url.find("://") else {
            return self.url.clone();
        };
        let authority_start = scheme_end + 3;
        let Some(at_offset) = self.url[authority_start..].find('@') else {
            return self.url.clone();
        };
        let credentials = &self.url[authority_start..authority_start + at_offset];
        let user = credentials.split(':').next().unwrap_or_default();
        format!(
            "{}{}:***{}",
            &self.url[..authority_start],
            user,
            &self.url[authority_start + at_offset..]
        )
    }
}

/// Thresholds for pace classification, ranking and highlighting
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Number of batches shown on the leaderboard
    pub leaderboard_size: usize,
    /// Share of the daily target under which a batch is lagging
    pub lagging_ratio: f64,
    /// Last stage number tracked by the bottleneck report
    pub max_tracked_stage: i64,
    /// Points at which a batch is highlighted as a gold performer
    pub gold_points_threshold: i64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            leaderboard_size: thresholds::LEADERBOARD_SIZE,
            lagging_ratio: thresholds::LAGGING_RATIO,
            max_tracked_stage: thresholds::MAX_TRACKED_STAGE,
            gold_points_threshold: thresholds::GOLD_POINTS_THRESHOLD,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "database.url",
                "database configuration",
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigurationError::invalid_value(
                "database.max_connections",
                "0",
                "pool size must be greater than 0",
            ));
        }

        self.dashboard.validate()
    }
}

impl DashboardSettings {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.leaderboard_size == 0 {
            return Err(ConfigurationError::invalid_value(
                "dashboard.leaderboard_size",
                "0",
                "leaderboard must show at least one batch",
            ));
        }

        if !(self.lagging_ratio > 0.0 && self.lagging_ratio <= 1.0) {
            return Err(ConfigurationError::invalid_value(
                "dashboard.lagging_ratio",
                self.lagging_ratio.to_string(),
                "ratio must be in (0, 1]",
            ));
        }

        if self.max_tracked_stage < 1 {
            return Err(ConfigurationError::invalid_value(
                "dashboard.max_tracked_stage",
                self.max_tracked_stage.to_string(),
                "at least one stage must be tracked",
            ));
        }

        Ok(())
    }
}
