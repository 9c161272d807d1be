//! # Data Models
//!
//! Typed batch snapshots and the raw record shape they are normalized from.

pub mod batch;

pub use batch::{Batch, RawBatchRecord, StageRequirement};
