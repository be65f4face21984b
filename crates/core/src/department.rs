//! Department entity.

use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A department owning employees and projects.
///
/// Mutated only by administrative operations, never by the rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    /// Unique, searchable by name
    pub name: String,
    /// Monetary budget, always >= 0
    pub budget: Decimal,
    pub location: Option<String>,
}

impl Department {
    pub fn new(id: i64, name: &str, budget: Decimal, location: Option<&str>) -> CoreResult<Self> {
        if budget < Decimal::ZERO {
            return Err(CoreError::NegativeBudget(budget));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            budget,
            location: location.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejects_negative_budget() {
        let err = Department::new(1, "Engineering", dec!(-1), None);
        assert!(err.is_err());
    }

    #[test]
    fn test_zero_budget_is_allowed() {
        let dept = Department::new(1, "Engineering", dec!(0), Some("Berlin")).unwrap();
        assert_eq!(dept.budget, dec!(0));
    }
}
