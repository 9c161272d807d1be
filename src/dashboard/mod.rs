//! # Production Dashboard Aggregation
//!
//! Pure, stateless transformations that turn a snapshot of production
//! batches into what the dashboard shows: completion percentages, pace
//! badges, filtered cards, the leaderboard and the bottleneck stage.
//!
//! ## Components
//!
//! - [`progress_calculator`]: stage targets + completed counts -> volume and percentage
//! - [`pace_classifier`]: completed units vs. daily target -> `OnFire`/`Lagging`/`Normal`
//! - [`filter_engine`]: search text + status tab -> subset of batches
//! - [`ranking_engine`]: leaderboard and bottleneck report
//! - [`summary`]: card status, gold highlighting, headline numbers
//! - [`pipeline`]: runs the components above for one rendering pass
//!
//! Nothing here performs I/O or keeps state between calls. Malformed batch
//! data is repaired before it gets here (see [`crate::models::RawBatchRecord`]),
//! so every function is total.
//!
//! ```rust
//! use uniform_production::dashboard::{DashboardPipeline, DashboardQuery};
//! use uniform_production::models::Batch;
//!
//! let batches = vec![
//!     Batch::new(1, "Class 5 Shirts", "Shirt")
//!         .with_stage("S1", 10)
//!         .with_stage("S2", 10)
//!         .with_completed("S1", 15)
//!         .with_completed("S2", 3),
//! ];
//!
//! let view = DashboardPipeline::default().build(&batches, &DashboardQuery::default());
//! assert_eq!(view.batches[0].progress.percentage, 65);
//! ```

pub mod filter_engine;
pub mod pace_classifier;
pub mod pipeline;
pub mod progress_calculator;
pub mod ranking_engine;
pub mod summary;
pub mod types;

pub use filter_engine::apply_filters;
pub use pace_classifier::{classify_pace, PaceClassifier};
pub use pipeline::DashboardPipeline;
pub use progress_calculator::{compute_progress, daily_progress_percentage};
pub use ranking_engine::{rank, RankingEngine};
pub use summary::{display_status, is_gold_performer, summarize};
pub use types::{
    BatchView, Bottleneck, DashboardQuery, DashboardSummary, DashboardView, LeaderboardEntry,
    ProgressMetrics, RankingReport,
};
