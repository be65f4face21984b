//! # Persistence Errors
//!
//! Error types for the ledger store, wrapping sqlx and conversion errors.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === Database errors ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record is inactive: {entity} with id {id}")]
    InactiveRecord { entity: String, id: String },

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    // === Conversion errors ===
    #[error("Invalid decimal value: {0}")]
    InvalidDecimal(String),

    #[error("Invalid enum value: {field} = {value}")]
    InvalidEnumValue { field: String, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // === Domain errors surfaced at the storage boundary ===
    #[error("Domain error: {0}")]
    Domain(#[from] staffledger_core::CoreError),
}

/// Result type alias for PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Create a NotFound error
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Create an InactiveRecord error
    pub fn inactive(entity: &str, id: impl ToString) -> Self {
        Self::InactiveRecord {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Check whether this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check whether this is an invalid-state error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InactiveRecord { .. })
    }
}
