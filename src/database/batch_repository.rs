//! # Batch Repository
//!
//! Read-only access to production batch snapshots. Implementations fetch rows
//! in whatever shape storage holds them and hand back normalized [`Batch`]es,
//! most recent first.
//!
//! ## PostgreSQL Query
//!
//! ```sql
//! SELECT g.*, p.current_stage, p.completed_stages
//! FROM production_groups g
//! LEFT JOIN production_progress p ON p.group_id = g.id
//! WHERE g.status = $1
//! ORDER BY g.created_at DESC NULLS LAST
//! ```
//!
//! Every loose column is cast to `text` or `bigint` in SQL so the row decodes
//! regardless of how a given deployment declared it.

use crate::constants::BatchStatus;
use crate::error::Result;
use crate::logging::log_repository_operation;
use crate::models::{Batch, RawBatchRecord};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[cfg(feature = "postgres")]
use crate::config::DatabaseConfig;
#[cfg(feature = "postgres")]
use crate::logging::log_error;
#[cfg(feature = "postgres")]
use crate::utils::serde::parse_json_text;
#[cfg(feature = "postgres")]
use chrono::{DateTime, Utc};
#[cfg(feature = "postgres")]
use serde_json::Value;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgPoolOptions;
#[cfg(feature = "postgres")]
use sqlx::{FromRow, PgPool};
#[cfg(feature = "postgres")]
use std::time::Instant;

/// Source of batch snapshots for a dashboard pass
#[async_trait]
pub trait BatchRepository: Send + Sync {
    /// All batches with the given lifecycle status, most recent first
    async fn fetch_by_status(&self, status: &BatchStatus) -> Result<Vec<Batch>>;

    /// Batches still on the production floor
    async fn fetch_active(&self) -> Result<Vec<Batch>> {
        self.fetch_by_status(&BatchStatus::Active).await
    }
}

#[cfg(feature = "postgres")]
/// One joined row of `production_groups` and `production_progress`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BatchRow {
    pub id: i64,
    pub group_name: Option<String>,
    pub dress_type: Option<String>,
    pub status: Option<String>,
    pub required_stages: Option<String>,
    pub completed_stages: Option<String>,
    pub daily_target: Option<i64>,
    pub points: Option<i64>,
    pub delay_reason: Option<String>,
    pub current_stage: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(feature = "postgres")]
impl From<BatchRow> for RawBatchRecord {
    fn from(row: BatchRow) -> Self {
        RawBatchRecord {
            id: row.id,
            group_name: optional_value(row.group_name),
            dress_type: optional_value(row.dress_type),
            status: optional_value(row.status),
            required_stages: parse_json_text(row.required_stages.as_deref()),
            completed_stages: parse_json_text(row.completed_stages.as_deref()),
            daily_target: optional_value(row.daily_target),
            points: optional_value(row.points),
            delay_reason: optional_value(row.delay_reason),
            current_stage: optional_value(row.current_stage),
            created_at: optional_value(row.created_at.map(|ts| ts.to_rfc3339())),
        }
    }
}

#[cfg(feature = "postgres")]
fn optional_value<T: Into<Value>>(column: Option<T>) -> Value {
    column.map(Into::into).unwrap_or(Value::Null)
}

#[cfg(feature = "postgres")]
const FETCH_BY_STATUS_SQL: &str = r#"
    SELECT
        g.id::bigint AS id,
        g.group_name::text AS group_name,
        g.dress_type::text AS dress_type,
        g.status::text AS status,
        g.required_stages::text AS required_stages,
        p.completed_stages::text AS completed_stages,
        g.daily_target::bigint AS daily_target,
        g.points::bigint AS points,
        g.delay_reason::text AS delay_reason,
        p.current_stage::bigint AS current_stage,
        g.created_at::timestamptz AS created_at
    FROM production_groups g
    LEFT JOIN production_progress p ON p.group_id = g.id
    WHERE g.status = $1
    ORDER BY g.created_at DESC NULLS LAST
"#;

#[cfg(feature = "postgres")]
/// PostgreSQL-backed repository
#[derive(Debug, Clone)]
pub struct PgBatchRepository {
    pool: PgPool,
}

#[cfg(feature = "postgres")]
impl PgBatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool using the configured connection settings
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await?;

        tracing::info!(
            database_url = %config.sanitized_url(),
            max_connections = config.max_connections,
            "Batch repository connected"
        );

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(feature = "postgres")]
#[async_trait]
impl BatchRepository for PgBatchRepository {
    async fn fetch_by_status(&self, status: &BatchStatus) -> Result<Vec<Batch>> {
        let started = Instant::now();

        let rows = sqlx::query_as::<_, BatchRow>(FETCH_BY_STATUS_SQL)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .inspect_err(|e| {
                log_error(
                    "batch_repository",
                    "fetch_by_status",
                    &e.to_string(),
                    Some(status.as_str()),
                )
            })?;

        let batches: Vec<Batch> = rows
            .into_iter()
            .map(|row| RawBatchRecord::from(row).normalize())
            .collect();

        log_repository_operation(
            "fetch_by_status",
            status.as_str(),
            Some(batches.len()),
            "success",
            Some(started.elapsed().as_millis() as u64),
        );

        Ok(batches)
    }
}

/// Repository over an in-process snapshot, for tests and offline rendering
#[derive(Debug, Clone, Default)]
pub struct InMemoryBatchRepository {
    batches: Arc<RwLock<Vec<Batch>>>,
}

impl InMemoryBatchRepository {
    pub fn new(batches: Vec<Batch>) -> Self {
        Self {
            batches: Arc::new(RwLock::new(batches)),
        }
    }

    /// Build from loose records, normalizing each one
    pub fn from_raw_records(records: Vec<RawBatchRecord>) -> Self {
        Self::new(records.into_iter().map(RawBatchRecord::normalize).collect())
    }

    pub async fn insert(&self, batch: Batch) {
        self.batches.write().await.push(batch);
    }

    pub async fn len(&self) -> usize {
        self.batches.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.batches.read().await.is_empty()
    }
}

#[async_trait]
impl BatchRepository for InMemoryBatchRepository {
    async fn fetch_by_status(&self, status: &BatchStatus) -> Result<Vec<Batch>> {
        let mut matching: Vec<Batch> = self
            .batches
            .read()
            .await
            .iter()
            .filter(|batch| &batch.status == status)
            .cloned()
            .collect();

        // Undated batches sort last, as with NULLS LAST in the SQL query
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        log_repository_operation(
            "fetch_by_status",
            status.as_str(),
            Some(matching.len()),
            "success",
            None,
        );

        Ok(matching)
    }
}
