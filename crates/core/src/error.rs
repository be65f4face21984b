//! # Error Module
//!
//! Domain errors for Staffledger using thiserror.

use rust_decimal::Decimal;
use thiserror::Error;

/// Core domain errors.
///
/// Business-rule failures only, nothing infrastructure related.
#[derive(Debug, Error)]
pub enum CoreError {
    // === Not found ===
    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),

    #[error("Department not found: {0}")]
    DepartmentNotFound(i64),

    // === Invalid state ===
    #[error("Employee is inactive: {0}")]
    InactiveEmployee(i64),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Unknown project status: {0}")]
    UnknownProjectStatus(String),

    // === Constraint violations ===
    #[error("Salary must be positive: {0}")]
    NonPositiveSalary(Decimal),

    #[error("Negative amount for {field}: {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("Department budget must be non-negative: {0}")]
    NegativeBudget(Decimal),

    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),

    // === Permission errors ===
    #[error("Permission denied: {actor} lacks capability {capability}")]
    PermissionDenied { actor: String, capability: String },

    // === Validation errors ===
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Check whether this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::EmployeeNotFound(_) | CoreError::DepartmentNotFound(_)
        )
    }

    /// Check whether this is an invalid-state error
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            CoreError::InactiveEmployee(_)
                | CoreError::InvalidDateRange(_)
                | CoreError::UnknownProjectStatus(_)
        )
    }

    /// Check whether this is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            CoreError::NonPositiveSalary(_)
                | CoreError::NegativeAmount { .. }
                | CoreError::NegativeBudget(_)
                | CoreError::DivisionByZero(_)
        )
    }

    /// Check whether this is a permission error
    pub fn is_permission_error(&self) -> bool {
        matches!(self, CoreError::PermissionDenied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = CoreError::NonPositiveSalary(dec!(-100));
        assert_eq!(err.to_string(), "Salary must be positive: -100");

        let err = CoreError::EmployeeNotFound(42);
        assert_eq!(err.to_string(), "Employee not found: 42");
    }

    #[test]
    fn test_error_checks() {
        assert!(CoreError::EmployeeNotFound(1).is_not_found());
        assert!(CoreError::InactiveEmployee(1).is_invalid_state());
        assert!(CoreError::NonPositiveSalary(dec!(0)).is_constraint_violation());
        assert!(CoreError::PermissionDenied {
            actor: "bob".to_string(),
            capability: "AdjustSalaries".to_string(),
        }
        .is_permission_error());
    }
}
