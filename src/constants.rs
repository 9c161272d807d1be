//! # Production Constants
//!
//! Lifecycle flags, dashboard categories and the thresholds that drive pace
//! classification and ranking.

use crate::error::{ProductionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Thresholds and defaults shared by the aggregation components
pub mod thresholds {
    /// A batch is lagging when it has completed less than this share of its daily target
    pub const LAGGING_RATIO: f64 = 0.3;

    /// Number of entries shown on the leaderboard
    pub const LEADERBOARD_SIZE: usize = 3;

    /// Highest stage number tracked by the bottleneck report; later stages fold into it
    pub const MAX_TRACKED_STAGE: i64 = 10;

    /// Points at which a batch is highlighted as a gold performer
    pub const GOLD_POINTS_THRESHOLD: i64 = 50;

    /// Percentage at which a batch counts as complete
    pub const COMPLETE_PERCENTAGE: u8 = 100;
}

/// Lifecycle flag stored on `production_groups.status`.
///
/// This is maintained by the repository and is independent of the computed
/// completion percentage: a batch can be `Active` at 100% until someone
/// archives it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BatchStatus {
    #[default]
    Active,
    Completed,
    Other(String),
}

impl BatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BatchStatus::Active => "Active",
            BatchStatus::Completed => "Completed",
            BatchStatus::Other(value) => value.as_str(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, BatchStatus::Active)
    }
}

impl From<&str> for BatchStatus {
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | "Active" | "active" => BatchStatus::Active,
            "Completed" | "completed" => BatchStatus::Completed,
            other => BatchStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for BatchStatus {
    fn from(value: String) -> Self {
        BatchStatus::from(value.as_str())
    }
}

impl From<BatchStatus> for String {
    fn from(value: BatchStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status category selected on the dashboard filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    InProgress,
    Completed,
    NotStarted,
    Delayed,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::InProgress => "in-progress",
            StatusFilter::Completed => "completed",
            StatusFilter::NotStarted => "not-started",
            StatusFilter::Delayed => "delayed",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ProductionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "in-progress" => Ok(StatusFilter::InProgress),
            "completed" => Ok(StatusFilter::Completed),
            "not-started" => Ok(StatusFilter::NotStarted),
            "delayed" => Ok(StatusFilter::Delayed),
            other => Err(ProductionError::ValidationError(format!(
                "unknown status filter '{other}'"
            ))),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pace of a batch relative to its daily target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceLabel {
    OnFire,
    Lagging,
    Normal,
}

impl PaceLabel {
    /// Badge text shown on the batch card; `Normal` carries no badge
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            PaceLabel::OnFire => Some("On Fire"),
            PaceLabel::Lagging => Some("Lagging"),
            PaceLabel::Normal => None,
        }
    }
}

/// Display status derived for a batch card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Delayed,
    Completed,
    NotStarted,
    InProgress,
}

impl ProgressStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProgressStatus::Delayed => "Delayed",
            ProgressStatus::Completed => "Completed",
            ProgressStatus::NotStarted => "Not Started",
            ProgressStatus::InProgress => "In Progress",
        }
    }

    /// Check if this status needs someone's attention
    pub fn is_problematic(&self) -> bool {
        matches!(self, ProgressStatus::Delayed)
    }
}
