//! # Database Layer
//!
//! Boundary to the batch tables owned by the surrounding web application.
//! This crate only reads; schema management and writes happen elsewhere.
//!
//! The PostgreSQL repository is behind the default `postgres` feature; the
//! in-memory repository is always available.

pub mod batch_repository;

pub use batch_repository::{BatchRepository, InMemoryBatchRepository};

#[cfg(feature = "postgres")]
pub use batch_repository::{BatchRow, PgBatchRepository};
