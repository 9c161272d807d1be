//! Shared types produced and consumed by the dashboard components.
//!
//! Everything here is ephemeral: derived for one rendering pass and never
//! written back to storage.

use crate::constants::{thresholds, PaceLabel, ProgressStatus, StatusFilter};
use crate::models::Batch;
use serde::{Deserialize, Serialize};

/// Stage-based progress of a single batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressMetrics {
    /// Total units required across all stages
    pub volume: i64,
    /// Units completed, each stage capped at its target
    pub completed_items: i64,
    /// Rounded completion percentage in `0..=100`
    pub percentage: u8,
}

impl ProgressMetrics {
    pub fn is_complete(&self) -> bool {
        self.percentage >= thresholds::COMPLETE_PERCENTAGE
    }

    pub fn is_not_started(&self) -> bool {
        self.percentage == 0
    }

    pub fn is_in_progress(&self) -> bool {
        self.percentage > 0 && self.percentage < thresholds::COMPLETE_PERCENTAGE
    }
}

/// A batch snapshot augmented with its derived metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchView {
    pub batch: Batch,
    pub progress: ProgressMetrics,
    pub daily_progress_percentage: f64,
    pub pace: PaceLabel,
    pub display_status: ProgressStatus,
    pub is_gold_performer: bool,
}

impl BatchView {
    pub fn percentage(&self) -> u8 {
        self.progress.percentage
    }
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub batch_id: i64,
    pub group_name: String,
    pub points: i64,
    pub daily_progress_percentage: f64,
}

/// The stage currently holding the most unfinished batches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub stage: i64,
    pub stage_label: String,
    pub count: usize,
}

/// Output of the ranking engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankingReport {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub bottleneck: Option<Bottleneck>,
}

/// Headline numbers shown above the batch grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub active_batches: usize,
    pub total_volume: i64,
    /// Mean stage-based completion percentage, rounded
    pub average_progress: u8,
    pub delayed_batches: usize,
    pub completed_batches: usize,
}

impl DashboardSummary {
    /// Production efficiency as reported on the overview page.
    ///
    /// Defined as the average stage-based completion so every view agrees on
    /// one number.
    pub fn efficiency(&self) -> u8 {
        self.average_progress
    }
}

/// Filter parameters chosen by the person viewing the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: StatusFilter,
}

impl DashboardQuery {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }
}

/// Everything the presentation layer needs for one rendering pass
///
/// The search text and status tab scope both the card list and the ranking:
/// typing in the search box changes the leaderboard and bottleneck too. Only
/// the summary always reflects the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Batches that passed the filters, in input order
    pub batches: Vec<BatchView>,
    /// Leaderboard and bottleneck over the filtered batches
    pub ranking: RankingReport,
    /// Computed over the whole snapshot, independent of filters
    pub summary: DashboardSummary,
}
