//! # Progress Calculator
//!
//! Turns a batch's required stages and completed counts into a volume and a
//! completion percentage.
//!
//! Each stage contributes at most its own target, so over-reporting on one
//! stage cannot mask a shortfall on another:
//!
//! ```text
//! S1: target 10, completed 15  -> contributes 10
//! S2: target 10, completed  3  -> contributes  3
//! volume 20, completed 13, percentage 65
//! ```

use super::types::ProgressMetrics;
use crate::models::Batch;

/// Compute volume, completed units and completion percentage for a batch.
pub fn compute_progress(batch: &Batch) -> ProgressMetrics {
    let (volume, completed_items) =
        batch
            .required_stages
            .iter()
            .fold((0i64, 0i64), |(volume, completed), stage| {
                let target = stage.target.max(0);
                let done = batch.completed_for(&stage.id).clamp(0, target);
                (
                    volume.saturating_add(target),
                    completed.saturating_add(done),
                )
            });

    ProgressMetrics {
        volume,
        completed_items,
        percentage: completion_percentage(completed_items, volume),
    }
}

/// Rounded share of `completed` in `volume`, clamped to `0..=100`.
pub fn completion_percentage(completed: i64, volume: i64) -> u8 {
    if volume <= 0 {
        return 0;
    }
    let pct = (100.0 * completed as f64 / volume as f64).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Completed units as a percentage of the daily target; `0.0` without a target.
///
/// Not capped: a batch that has done twice its daily target reports `200.0`.
pub fn daily_progress_percentage(batch: &Batch, completed_items: i64) -> f64 {
    if batch.daily_target <= 0 {
        return 0.0;
    }
    completed_items as f64 / batch.daily_target as f64 * 100.0
}
