//! # Structured Logging Module
//!
//! Environment-aware structured logging for the tracker core. Development and
//! test runs get human-readable console output at `debug`; production gets
//! JSON lines at `info`. `RUST_LOG` overrides the level when set.

use chrono::Utc;
use std::process;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));

        let console = if environment == "production" {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .json()
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(true)
                .boxed()
        };

        // A host application may already have installed a subscriber
        if tracing_subscriber::registry()
            .with(console.with_filter(filter))
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            pid = process::id(),
            environment = %environment,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("PRODUCTION_TRACKER_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log one dashboard rendering pass
pub fn log_dashboard_pass(
    snapshot_size: usize,
    visible_batches: usize,
    leaderboard_entries: usize,
    bottleneck_stage: Option<&str>,
    duration_ms: u64,
) {
    tracing::debug!(
        snapshot_size = snapshot_size,
        visible_batches = visible_batches,
        leaderboard_entries = leaderboard_entries,
        bottleneck_stage = bottleneck_stage,
        duration_ms = duration_ms,
        "DASHBOARD_PASS"
    );
}

/// Log structured data for repository operations
pub fn log_repository_operation(
    operation: &str,
    status_filter: &str,
    record_count: Option<usize>,
    status: &str,
    duration_ms: Option<u64>,
) {
    tracing::info!(
        operation = %operation,
        status_filter = %status_filter,
        record_count = record_count,
        status = %status,
        duration_ms = duration_ms,
        timestamp = %Utc::now().to_rfc3339(),
        "REPOSITORY_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
