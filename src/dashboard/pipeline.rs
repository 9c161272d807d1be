//! # Dashboard Pipeline
//!
//! Runs one rendering pass over a batch snapshot:
//!
//! ```text
//! snapshot -> progress -> pace -> status/gold -> filter -> rank
//!                                      \
//!                                       -> summary (whole snapshot)
//! ```
//!
//! The pipeline holds only its settings, so one instance can serve any number
//! of concurrent passes.

use super::filter_engine::apply_filters;
use super::pace_classifier::PaceClassifier;
use super::progress_calculator::{compute_progress, daily_progress_percentage};
use super::ranking_engine::RankingEngine;
use super::summary::{display_status, is_gold_performer, summarize};
use super::types::{BatchView, DashboardQuery, DashboardView};
use crate::config::DashboardSettings;
use crate::logging::log_dashboard_pass;
use crate::models::Batch;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct DashboardPipeline {
    settings: DashboardSettings,
    pace: PaceClassifier,
    ranking: RankingEngine,
}

impl Default for DashboardPipeline {
    fn default() -> Self {
        Self::new(DashboardSettings::default())
    }
}

impl DashboardPipeline {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            pace: PaceClassifier::new(settings.lagging_ratio),
            ranking: RankingEngine::new(settings.leaderboard_size, settings.max_tracked_stage),
            settings,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Derive metrics for a single batch.
    pub fn augment(&self, batch: Batch) -> BatchView {
        let progress = compute_progress(&batch);
        let daily_progress_percentage = daily_progress_percentage(&batch, progress.completed_items);
        let pace = self
            .pace
            .classify(&batch, progress.completed_items, progress.percentage);
        let display_status = display_status(&batch, progress.percentage);
        let is_gold_performer = is_gold_performer(&batch, self.settings.gold_points_threshold);

        BatchView {
            batch,
            progress,
            daily_progress_percentage,
            pace,
            display_status,
            is_gold_performer,
        }
    }

    /// Build the full dashboard for a snapshot and the viewer's filters.
    pub fn build(&self, batches: &[Batch], query: &DashboardQuery) -> DashboardView {
        let started = Instant::now();

        let views: Vec<BatchView> = batches
            .iter()
            .cloned()
            .map(|batch| self.augment(batch))
            .collect();

        let summary = summarize(&views);
        let filtered = apply_filters(&views, &query.search, query.status);
        let ranking = self.ranking.rank(filtered.iter().copied());
        let filtered: Vec<BatchView> = filtered.into_iter().cloned().collect();

        log_dashboard_pass(
            views.len(),
            filtered.len(),
            ranking.leaderboard.len(),
            ranking.bottleneck.as_ref().map(|b| b.stage_label.as_str()),
            started.elapsed().as_millis() as u64,
        );

        DashboardView {
            batches: filtered,
            ranking,
            summary,
        }
    }
}

/// Augment a batch with the given settings without constructing a pipeline.
pub fn build_view(batch: Batch, settings: &DashboardSettings) -> BatchView {
    DashboardPipeline::new(settings.clone()).augment(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PaceLabel, ProgressStatus, StatusFilter};

    fn snapshot() -> Vec<Batch> {
        vec![
            Batch::new(1, "Class 6 Shirts", "Shirt")
                .with_stage("S1", 50)
                .with_stage("S2", 50)
                .with_completed("S1", 50)
                .with_completed("S2", 10)
                .with_daily_target(40)
                .with_points(60)
                .with_current_stage(2),
            Batch::new(2, "Class 6 Skirts", "Skirt")
                .with_stage("S1", 40)
                .with_completed("S1", 40)
                .with_current_stage(10),
            Batch::new(3, "House Tees", "T-Shirt")
                .with_stage("S1", 100)
                .with_completed("S1", 2)
                .with_daily_target(20)
                .with_delay_reason("Printing vendor")
                .with_current_stage(1),
        ]
    }

    #[test]
    fn test_augment_derives_every_metric() {
        let pipeline = DashboardPipeline::default();
        let view = pipeline.augment(snapshot().remove(0));

        assert_eq!(view.progress.volume, 100);
        assert_eq!(view.progress.completed_items, 60);
        assert_eq!(view.percentage(), 60);
        assert_eq!(view.daily_progress_percentage, 150.0);
        assert_eq!(view.pace, PaceLabel::OnFire);
        assert_eq!(view.display_status, ProgressStatus::InProgress);
        assert!(view.is_gold_performer);
    }

    #[test]
    fn test_build_unfiltered() {
        let pipeline = DashboardPipeline::default();
        let view = pipeline.build(&snapshot(), &DashboardQuery::default());

        assert_eq!(view.batches.len(), 3);
        assert_eq!(view.summary.active_batches, 3);
        assert_eq!(view.summary.completed_batches, 1);

        let leaders: Vec<i64> = view.ranking.leaderboard.iter().map(|e| e.batch_id).collect();
        assert_eq!(leaders, vec![1, 3]);

        let bottleneck = view.ranking.bottleneck.unwrap();
        assert_eq!(bottleneck.count, 1);
        assert_eq!(bottleneck.stage, 1);

        let delayed = &view.batches[2];
        assert_eq!(delayed.display_status, ProgressStatus::Delayed);
        assert_eq!(delayed.pace, PaceLabel::Lagging);
    }

    #[test]
    fn test_build_ranks_filtered_set_but_summarizes_snapshot() {
        let pipeline = DashboardPipeline::default();
        let query = DashboardQuery::new("tees", StatusFilter::All);
        let view = pipeline.build(&snapshot(), &query);

        assert_eq!(view.batches.len(), 1);
        assert_eq!(view.batches[0].batch.id, 3);
        assert_eq!(view.ranking.leaderboard.len(), 1);
        assert_eq!(view.ranking.leaderboard[0].batch_id, 3);
        assert_eq!(view.summary.active_batches, 3);
    }

    #[test]
    fn test_build_does_not_mutate_snapshot() {
        let batches = snapshot();
        let before = batches.clone();
        let _ = DashboardPipeline::default().build(&batches, &DashboardQuery::default());
        assert_eq!(batches, before);
    }
}
