//! Error types for the production tracker core.
//!
//! Malformed batch data never surfaces here: it is repaired inside the
//! normalization adapter. These variants only cover the crate boundary
//! (storage, configuration and caller-supplied parameters).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductionError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for ProductionError {
    fn from(err: sqlx::Error) -> Self {
        ProductionError::DatabaseError(err.to_string())
    }
}

impl From<config::ConfigError> for ProductionError {
    fn from(err: config::ConfigError) -> Self {
        ProductionError::ConfigurationError(err.to_string())
    }
}

impl From<serde_json::Error> for ProductionError {
    fn from(err: serde_json::Error) -> Self {
        ProductionError::SerializationError(format!("JSON serialization error: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, ProductionError>;
