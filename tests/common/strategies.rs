#![allow(dead_code)]

use proptest::prelude::*;
use serde_json::{json, Value};
use uniform_production::models::Batch;

/// Strategy for stage ids as the dashboard names them
pub fn stage_id_strategy() -> impl Strategy<Value = String> {
    "S[0-9]{1,2}"
}

/// Strategy for `(stage id, target, completed)` triples, including negative
/// and over-target counts
pub fn stage_strategy() -> impl Strategy<Value = (String, i64, i64)> {
    (stage_id_strategy(), -50i64..500, -50i64..1000)
}

/// Strategy for batches with arbitrary, possibly inconsistent, stage data
pub fn batch_strategy() -> impl Strategy<Value = Batch> {
    (
        1i64..10_000,
        prop::collection::vec(stage_strategy(), 0..8),
        -20i64..200,
        0i64..150,
        -5i64..20,
        prop::option::of("[a-z ]{0,12}"),
    )
        .prop_map(
            |(id, stages, daily_target, points, current_stage, delay_reason)| {
                let mut batch = Batch::new(id, format!("Group {id}"), "Shirt")
                    .with_daily_target(daily_target)
                    .with_points(points)
                    .with_current_stage(current_stage);
                for (stage_id, target, completed) in stages {
                    batch = batch
                        .with_stage(stage_id.clone(), target)
                        .with_completed(stage_id, completed);
                }
                if let Some(reason) = delay_reason {
                    batch = batch.with_delay_reason(reason);
                }
                batch
            },
        )
}

/// Strategy for the loose values storage may hand back for a numeric field
pub fn loose_number_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(|n| json!(n)),
        (-1000i32..1000).prop_map(|n| json!(n.to_string())),
        Just(json!(null)),
        Just(json!(true)),
        Just(json!("lots")),
        Just(json!([1, 2])),
        Just(json!({"n": 1})),
    ]
}

/// Strategy for the loose values storage may hand back for a text or timestamp field
pub fn loose_text_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[A-Za-z0-9 ]{0,16}".prop_map(|s| json!(s)),
        Just(json!("2024-06-01 09:00:00")),
        Just(json!("2024-06-01T09:00:00Z")),
        Just(json!("2024-13-45 99:99:99")),
        any::<i64>().prop_map(|n| json!(n)),
        Just(json!(null)),
        Just(json!(false)),
        Just(json!(["Shirt"])),
        Just(json!({"name": "Shirt"})),
    ]
}

/// Strategy for whatever may sit in a `required_stages` column
pub fn loose_stage_list_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!(null)),
        Just(json!("not json")),
        Just(json!(42)),
        Just(json!({"S1": 10})),
        Just(json!([{"target": 5}, "S1", 3])),
        prop::collection::vec((stage_id_strategy(), loose_number_strategy()), 0..5).prop_map(
            |stages| {
                Value::Array(
                    stages
                        .into_iter()
                        .map(|(id, target)| json!({"id": id, "target": target}))
                        .collect(),
                )
            }
        ),
    ]
}
