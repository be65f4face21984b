//! Business layer errors
//!
//! Uses anyhow for error aggregation with custom error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Validation errors ===
    #[error("Invalid percentage: {0}")]
    InvalidPercentage(Decimal),

    #[error("Invalid pay period: year {year}, month {month}")]
    InvalidPayPeriod { year: i32, month: u32 },

    // === Permission errors ===
    #[error("Permission denied: {actor} lacks capability {capability}")]
    PermissionDenied { actor: String, capability: String },

    // === Not found / state errors ===
    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),

    #[error("Employee is inactive: {0}")]
    InactiveEmployee(i64),

    #[error("Department not found: {0}")]
    DepartmentNotFound(i64),

    // === Transaction errors ===
    #[error("Transaction failed to commit: {0}")]
    CommitFailed(String),

    // === Wrapped errors ===
    #[error("Persistence error: {0}")]
    Persistence(#[from] staffledger_persistence::PersistenceError),

    #[error("Core error: {0}")]
    Core(#[from] staffledger_core::CoreError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = anyhow::Result<T>;

impl BusinessError {
    /// Create a permission denied error
    pub fn permission_denied(actor: &str, capability: staffledger_core::Capability) -> Self {
        Self::PermissionDenied {
            actor: actor.to_string(),
            capability: capability.as_str().to_string(),
        }
    }

    /// Check whether this is a permission error
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check whether this is a not-found error
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::EmployeeNotFound(_) | Self::DepartmentNotFound(_) => true,
            Self::Persistence(err) => err.is_not_found(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffledger_core::Capability;

    #[test]
    fn test_permission_denied_display() {
        let err = BusinessError::permission_denied("bob", Capability::AdjustSalaries);
        assert!(err.to_string().contains("bob"));
        assert!(err.to_string().contains("AdjustSalaries"));
        assert!(err.is_permission_error());
    }

    #[test]
    fn test_not_found_passthrough() {
        let err = BusinessError::Persistence(
            staffledger_persistence::PersistenceError::not_found("Employee", 9),
        );
        assert!(err.is_not_found());
    }
}
