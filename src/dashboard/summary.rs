//! Card status, gold highlighting and the headline numbers above the grid.

use super::types::{BatchView, DashboardSummary};
use crate::constants::ProgressStatus;
use crate::models::Batch;

/// Status shown on a batch card. A logged delay outranks any percentage.
pub fn display_status(batch: &Batch, percentage: u8) -> ProgressStatus {
    if batch.is_delayed() {
        ProgressStatus::Delayed
    } else if percentage >= 100 {
        ProgressStatus::Completed
    } else if percentage == 0 {
        ProgressStatus::NotStarted
    } else {
        ProgressStatus::InProgress
    }
}

pub fn is_gold_performer(batch: &Batch, gold_points_threshold: i64) -> bool {
    batch.points >= gold_points_threshold
}

/// Aggregate the whole snapshot into the dashboard headline numbers.
pub fn summarize<'a, I>(views: I) -> DashboardSummary
where
    I: IntoIterator<Item = &'a BatchView>,
{
    let mut summary = DashboardSummary::default();
    let mut progress_sum: u64 = 0;

    for view in views {
        summary.active_batches += 1;
        summary.total_volume = summary.total_volume.saturating_add(view.progress.volume);
        progress_sum += u64::from(view.progress.percentage);
        if view.batch.is_delayed() {
            summary.delayed_batches += 1;
        }
        if view.progress.is_complete() {
            summary.completed_batches += 1;
        }
    }

    if summary.active_batches > 0 {
        let mean = progress_sum as f64 / summary.active_batches as f64;
        summary.average_progress = mean.round().clamp(0.0, 100.0) as u8;
    }

    summary
}
