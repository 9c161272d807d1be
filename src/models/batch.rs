//! # Production Batch
//!
//! A batch (the dashboard calls it a "production group") is one production
//! run of a garment type. It is created and mutated by the surrounding web
//! application; this crate only ever reads snapshots of it.
//!
//! ## Storage Shape
//!
//! Batches live in `production_groups`, with the progress sub-record in
//! `production_progress` keyed by `group_id`. Several columns hold JSON in
//! TEXT form and have changed shape over time:
//!
//! ```text
//! required_stages   '[{"id":"S1","target":120}, ...]'   (sometimes double-encoded)
//! completed_stages  '{"S1": 80, "S2": "40"}'            (legacy rows: '[]')
//! daily_target      25 | "25" | NULL
//! delay_reason      '' | 'Fabric shortage' | NULL
//! ```
//!
//! [`RawBatchRecord`] accepts all of these, and [`RawBatchRecord::normalize`]
//! is the single place where loose input becomes a typed [`Batch`]. Nothing
//! downstream re-checks field shapes.

use crate::constants::BatchStatus;
use crate::utils::serde::{
    deserialize_lenient_i64, lenient_i64, lenient_string, lenient_timestamp, unwrap_json_string,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// One required production stage and the quantity it must reach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRequirement {
    pub id: String,
    pub target: i64,
}

impl StageRequirement {
    pub fn new(id: impl Into<String>, target: i64) -> Self {
        Self {
            id: id.into(),
            target,
        }
    }
}

/// Normalized snapshot of a production batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    pub group_name: String,
    pub dress_type: String,
    pub required_stages: Vec<StageRequirement>,
    pub completed_stages: HashMap<String, i64>,
    pub daily_target: i64,
    pub points: i64,
    pub delay_reason: Option<String>,
    pub status: BatchStatus,
    pub current_stage: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Batch {
    /// Create an empty active batch with no stages
    pub fn new(id: i64, group_name: impl Into<String>, dress_type: impl Into<String>) -> Self {
        Self {
            id,
            group_name: group_name.into(),
            dress_type: dress_type.into(),
            required_stages: Vec::new(),
            completed_stages: HashMap::new(),
            daily_target: 0,
            points: 0,
            delay_reason: None,
            status: BatchStatus::Active,
            current_stage: 0,
            created_at: None,
        }
    }

    pub fn with_stage(mut self, id: impl Into<String>, target: i64) -> Self {
        self.required_stages.push(StageRequirement::new(id, target));
        self
    }

    pub fn with_completed(mut self, id: impl Into<String>, count: i64) -> Self {
        self.completed_stages.insert(id.into(), count);
        self
    }

    pub fn with_daily_target(mut self, daily_target: i64) -> Self {
        self.daily_target = daily_target.max(0);
        self
    }

    pub fn with_points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    pub fn with_delay_reason(mut self, reason: impl Into<String>) -> Self {
        self.delay_reason = normalize_delay_reason(Some(reason.into()));
        self
    }

    pub fn with_current_stage(mut self, current_stage: i64) -> Self {
        self.current_stage = current_stage;
        self
    }

    pub fn with_status(mut self, status: BatchStatus) -> Self {
        self.status = status;
        self
    }

    /// Check if a delay has been logged against this batch.
    pub fn is_delayed(&self) -> bool {
        self.delay_reason
            .as_deref()
            .is_some_and(|reason| !reason.trim().is_empty())
    }

    /// Check if a daily target has been set.
    pub fn has_daily_target(&self) -> bool {
        self.daily_target > 0
    }

    /// Completed quantity recorded for a stage, `0` when absent.
    pub fn completed_for(&self, stage_id: &str) -> i64 {
        self.completed_stages.get(stage_id).copied().unwrap_or(0)
    }
}

/// Batch data as it arrives from storage or a JSON payload, before normalization.
///
/// Every field is kept as a [`serde_json::Value`] so that nothing can fail at
/// deserialization time; one bad row never takes its neighbours down with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBatchRecord {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub id: i64,
    #[serde(default)]
    pub group_name: Value,
    #[serde(default)]
    pub dress_type: Value,
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub required_stages: Value,
    #[serde(default)]
    pub completed_stages: Value,
    #[serde(default)]
    pub daily_target: Value,
    #[serde(default)]
    pub points: Value,
    #[serde(default)]
    pub delay_reason: Value,
    #[serde(default)]
    pub current_stage: Value,
    /// RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC)
    #[serde(default)]
    pub created_at: Value,
}

impl RawBatchRecord {
    /// Turn a loose record into a typed [`Batch`].
    ///
    /// Never fails. Malformed stage lists become empty, malformed numbers
    /// become `0`, negative daily targets become `0`, non-text names become
    /// empty, unparseable timestamps become `None`, and a blank delay reason
    /// means "not delayed".
    pub fn normalize(self) -> Batch {
        let batch_id = self.id;
        let required_stages = normalize_required_stages(batch_id, self.required_stages);
        let completed_stages = normalize_completed_stages(batch_id, self.completed_stages);

        let created_at = lenient_timestamp(&self.created_at);
        if created_at.is_none() && !self.created_at.is_null() {
            debug!(
                batch_id = batch_id,
                found = %json_kind(&self.created_at),
                "Unrecognized created_at, treating batch as undated"
            );
        }

        Batch {
            id: batch_id,
            group_name: lenient_string(&self.group_name).unwrap_or_default(),
            dress_type: lenient_string(&self.dress_type).unwrap_or_default(),
            required_stages,
            completed_stages,
            daily_target: lenient_i64(&self.daily_target).max(0),
            points: lenient_i64(&self.points),
            delay_reason: normalize_delay_reason(lenient_string(&self.delay_reason)),
            status: lenient_string(&self.status)
                .map(BatchStatus::from)
                .unwrap_or_default(),
            current_stage: lenient_i64(&self.current_stage),
            created_at,
        }
    }
}

impl From<RawBatchRecord> for Batch {
    fn from(raw: RawBatchRecord) -> Self {
        raw.normalize()
    }
}

fn normalize_delay_reason(reason: Option<String>) -> Option<String> {
    reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}

fn normalize_required_stages(batch_id: i64, value: Value) -> Vec<StageRequirement> {
    match unwrap_json_string(value) {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| stage_from_value(batch_id, entry))
            .collect(),
        Value::Null => Vec::new(),
        other => {
            debug!(
                batch_id = batch_id,
                found = %json_kind(&other),
                "required_stages is not a list, treating batch as having no stages"
            );
            Vec::new()
        }
    }
}

fn stage_from_value(batch_id: i64, entry: Value) -> Option<StageRequirement> {
    let Value::Object(fields) = entry else {
        debug!(batch_id = batch_id, "Skipping stage entry that is not an object");
        return None;
    };

    let id = match fields.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            debug!(batch_id = batch_id, "Skipping stage entry without an id");
            return None;
        }
    };

    let target = fields.get("target").map(lenient_i64).unwrap_or(0);
    Some(StageRequirement { id, target })
}

fn normalize_completed_stages(batch_id: i64, value: Value) -> HashMap<String, i64> {
    match unwrap_json_string(value) {
        Value::Object(counts) => counts
            .iter()
            .map(|(stage_id, count)| (stage_id.clone(), lenient_i64(count)))
            .collect(),
        Value::Null => HashMap::new(),
        other => {
            // Early rows stored a list of finished stage indices with no counts
            debug!(
                batch_id = batch_id,
                found = %json_kind(&other),
                "completed_stages is not a map, treating batch as having no progress"
            );
            HashMap::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
