//! Test data builders for dashboard scenarios

#![allow(dead_code)] // Not every test binary uses every builder

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use uniform_production::models::{Batch, RawBatchRecord};

/// Builder for batches whose progress is described as completed units per stage
pub struct BatchBuilder {
    batch: Batch,
}

impl BatchBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            batch: Batch::new(id, format!("Batch {id}"), "Shirt"),
        }
    }

    pub fn named(mut self, group_name: &str, dress_type: &str) -> Self {
        self.batch.group_name = group_name.to_string();
        self.batch.dress_type = dress_type.to_string();
        self
    }

    pub fn stage(mut self, id: &str, target: i64, completed: i64) -> Self {
        self.batch = self.batch.with_stage(id, target).with_completed(id, completed);
        self
    }

    /// Single 100-unit stage, so `completed` is also the percentage
    pub fn percent_complete(self, completed: i64) -> Self {
        self.stage("S1", 100, completed)
    }

    pub fn daily_target(mut self, daily_target: i64) -> Self {
        self.batch = self.batch.with_daily_target(daily_target);
        self
    }

    pub fn points(mut self, points: i64) -> Self {
        self.batch = self.batch.with_points(points);
        self
    }

    pub fn delayed(mut self, reason: &str) -> Self {
        self.batch = self.batch.with_delay_reason(reason);
        self
    }

    pub fn at_stage(mut self, current_stage: i64) -> Self {
        self.batch = self.batch.with_current_stage(current_stage);
        self
    }

    pub fn created_on(mut self, day: u32) -> Self {
        self.batch.created_at = Some(june(day));
        self
    }

    pub fn build(self) -> Batch {
        self.batch
    }
}

pub fn june(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, 8, 0, 0).unwrap()
}

/// A raw record shaped the way the legacy web tables store it: stage data
/// as JSON-encoded text and numbers as strings
pub fn legacy_record(id: i64, group_name: &str) -> RawBatchRecord {
    let payload: Value = json!({
        "id": id.to_string(),
        "group_name": group_name,
        "dress_type": "Skirt",
        "status": "Active",
        "required_stages": r#"[{"id":"S1","target":"40"},{"id":"S2","target":10}]"#,
        "completed_stages": r#"{"S1":"20","S2":10}"#,
        "daily_target": "15",
        "points": "35",
        "delay_reason": "   ",
        "current_stage": 2,
        "created_at": "2024-06-01 09:00:00",
    });
    serde_json::from_value(payload).unwrap()
}
