//! # Ranking Engine
//!
//! Builds the leaderboard and the bottleneck report from a set of batch views.
//!
//! ## Leaderboard
//!
//! Only unfinished batches compete. They are ordered by reward points, then
//! by daily progress against target. The sort is stable, so batches that tie
//! on both keep the order they arrived in (most recent first, from storage).
//!
//! ## Bottleneck
//!
//! Unfinished batches are bucketed by the stage they currently sit at.
//! Positions past the last tracked stage fold into it, positions below the
//! first fold into stage 1. The most populated stage is reported; on a tie
//! the earlier stage wins.

use super::types::{BatchView, Bottleneck, LeaderboardEntry, RankingReport};
use crate::constants::thresholds;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingEngine {
    leaderboard_size: usize,
    max_tracked_stage: i64,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self {
            leaderboard_size: thresholds::LEADERBOARD_SIZE,
            max_tracked_stage: thresholds::MAX_TRACKED_STAGE,
        }
    }
}

impl RankingEngine {
    pub fn new(leaderboard_size: usize, max_tracked_stage: i64) -> Self {
        Self {
            leaderboard_size,
            max_tracked_stage: max_tracked_stage.max(1),
        }
    }

    pub fn rank<'a, I>(&self, views: I) -> RankingReport
    where
        I: IntoIterator<Item = &'a BatchView>,
    {
        let unfinished: Vec<&BatchView> = views
            .into_iter()
            .filter(|view| !view.progress.is_complete())
            .collect();

        RankingReport {
            leaderboard: self.leaderboard(&unfinished),
            bottleneck: self.bottleneck(&unfinished),
        }
    }

    fn leaderboard(&self, candidates: &[&BatchView]) -> Vec<LeaderboardEntry> {
        let mut ordered = candidates.to_vec();
        ordered.sort_by(|a, b| compare_for_leaderboard(a, b));

        ordered
            .into_iter()
            .take(self.leaderboard_size)
            .map(|view| LeaderboardEntry {
                batch_id: view.batch.id,
                group_name: view.batch.group_name.clone(),
                points: view.batch.points,
                daily_progress_percentage: view.daily_progress_percentage,
            })
            .collect()
    }

    fn bottleneck(&self, unfinished: &[&BatchView]) -> Option<Bottleneck> {
        let mut by_stage: BTreeMap<i64, usize> = BTreeMap::new();
        for view in unfinished {
            let stage = view.batch.current_stage.clamp(1, self.max_tracked_stage);
            *by_stage.entry(stage).or_insert(0) += 1;
        }

        let mut busiest: Option<(i64, usize)> = None;
        for (stage, count) in by_stage {
            if busiest.map_or(true, |(_, best)| count > best) {
                busiest = Some((stage, count));
            }
        }

        busiest.map(|(stage, count)| Bottleneck {
            stage,
            stage_label: stage_label(stage),
            count,
        })
    }
}

/// Points descending, then daily progress descending.
fn compare_for_leaderboard(a: &BatchView, b: &BatchView) -> Ordering {
    b.batch.points.cmp(&a.batch.points).then_with(|| {
        b.daily_progress_percentage
            .total_cmp(&a.daily_progress_percentage)
    })
}

/// Display label for a stage number.
pub fn stage_label(stage: i64) -> String {
    format!("Stage {stage}")
}

/// Rank with the default leaderboard size and stage range.
pub fn rank<'a, I>(views: I) -> RankingReport
where
    I: IntoIterator<Item = &'a BatchView>,
{
    RankingEngine::default().rank(views)
}
