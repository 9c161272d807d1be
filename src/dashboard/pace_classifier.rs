//! # Pace Classifier
//!
//! Labels a batch by how its completed units compare to its daily target.
//! Rules are evaluated in order, first match wins:
//!
//! 1. `OnFire`: target set and completed units reached it
//! 2. `Lagging`: target set, under the lagging share of it, and not finished
//! 3. `Normal`: everything else, including batches without a target

use crate::constants::{thresholds, PaceLabel};
use crate::models::Batch;

/// Pace classification with a configurable lagging threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceClassifier {
    lagging_ratio: f64,
}

impl Default for PaceClassifier {
    fn default() -> Self {
        Self {
            lagging_ratio: thresholds::LAGGING_RATIO,
        }
    }
}

impl PaceClassifier {
    pub fn new(lagging_ratio: f64) -> Self {
        Self { lagging_ratio }
    }

    pub fn lagging_ratio(&self) -> f64 {
        self.lagging_ratio
    }

    pub fn classify(&self, batch: &Batch, completed_items: i64, percentage: u8) -> PaceLabel {
        let daily_target = batch.daily_target;
        if daily_target <= 0 {
            return PaceLabel::Normal;
        }

        if completed_items >= daily_target {
            PaceLabel::OnFire
        } else if (completed_items as f64) < self.lagging_ratio * daily_target as f64
            && percentage < thresholds::COMPLETE_PERCENTAGE
        {
            PaceLabel::Lagging
        } else {
            PaceLabel::Normal
        }
    }
}

/// Classify pace using the default lagging threshold.
pub fn classify_pace(batch: &Batch, completed_items: i64, percentage: u8) -> PaceLabel {
    PaceClassifier::default().classify(batch, completed_items, percentage)
}
