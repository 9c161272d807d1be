#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Uniform Production Core
//!
//! Production progress aggregation for the school-uniform batch dashboard.
//!
//! ## Overview
//!
//! The surrounding web application manages schools, students, measurements,
//! patterns and production batches. This crate owns the part of it that
//! answers "how is production going?": per-batch completion, pace against the
//! daily target, filtering for the dashboard tabs, the points leaderboard and
//! the bottleneck stage.
//!
//! ## Module Organization
//!
//! - [`models`] - Typed batch snapshots and the loose-record normalization adapter
//! - [`dashboard`] - Progress, pace, filter and ranking components plus the pass pipeline
//! - [`database`] - Read-only batch repository (in-memory, PostgreSQL with the `postgres` feature)
//! - [`config`] - Layered configuration for the repository and dashboard thresholds
//! - [`constants`] - Lifecycle flags, filter categories and thresholds
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use uniform_production::config::ConfigManager;
//! use uniform_production::dashboard::{DashboardPipeline, DashboardQuery};
//! use uniform_production::database::{BatchRepository, PgBatchRepository};
//! use uniform_production::StatusFilter;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let repository = PgBatchRepository::connect(&manager.config().database).await?;
//!
//! let batches = repository.fetch_active().await?;
//! let pipeline = DashboardPipeline::new(manager.config().dashboard.clone());
//! let view = pipeline.build(&batches, &DashboardQuery::new("shirt", StatusFilter::InProgress));
//!
//! for entry in &view.ranking.leaderboard {
//!     println!("{} - {} pts", entry.group_name, entry.points);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit and integration tests
//! ```

pub mod config;
pub mod constants;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod utils;

pub use config::{ConfigManager, DashboardSettings, DatabaseConfig, TrackerConfig};
pub use constants::{thresholds, BatchStatus, PaceLabel, ProgressStatus, StatusFilter};
pub use dashboard::{
    apply_filters, classify_pace, compute_progress, rank, DashboardPipeline, DashboardQuery,
    DashboardView,
};
pub use error::{ProductionError, Result};
pub use models::{Batch, RawBatchRecord, StageRequirement};
