//! Audit entries - immutable before/after log of employee mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of mutation an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOperation {
    Insert,
    Update,
    Delete,
}

impl AuditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOperation::Insert => "insert",
            AuditOperation::Update => "update",
            AuditOperation::Delete => "delete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "insert" => Some(AuditOperation::Insert),
            "update" => Some(AuditOperation::Update),
            "delete" => Some(AuditOperation::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One append-only audit entry. Never mutated or deleted.
///
/// `old_value` / `new_value` hold JSON snapshots of the changed fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub table_name: String,
    pub record_id: i64,
    pub operation: AuditOperation,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}

/// Snapshot of the audited employee fields, serialized into
/// `old_value` / `new_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeAuditSnapshot {
    pub salary: rust_decimal::Decimal,
    pub department_id: Option<i64>,
}

/// Whether a salary/department change warrants an audit entry.
///
/// Matches the legacy trigger guard: departments are compared with
/// null-as-zero semantics, so `None` and `Some(0)` are the same value.
pub fn salary_or_department_changed(
    old_salary: rust_decimal::Decimal,
    new_salary: rust_decimal::Decimal,
    old_department: Option<i64>,
    new_department: Option<i64>,
) -> bool {
    old_salary != new_salary || old_department.unwrap_or(0) != new_department.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_entry_for_identical_values() {
        assert!(!salary_or_department_changed(
            dec!(5000),
            dec!(5000),
            Some(1),
            Some(1)
        ));
    }

    #[test]
    fn test_null_department_compares_as_zero() {
        // None vs Some(0) is not a change under the legacy guard
        assert!(!salary_or_department_changed(
            dec!(5000),
            dec!(5000),
            None,
            Some(0)
        ));
        assert!(salary_or_department_changed(
            dec!(5000),
            dec!(5000),
            None,
            Some(2)
        ));
    }

    #[test]
    fn test_salary_change_detected() {
        assert!(salary_or_department_changed(
            dec!(5000),
            dec!(5500),
            Some(1),
            Some(1)
        ));
    }

    #[test]
    fn test_operation_roundtrip() {
        assert_eq!(AuditOperation::parse("update"), Some(AuditOperation::Update));
        assert_eq!(AuditOperation::Update.as_str(), "update");
        assert_eq!(AuditOperation::parse("upsert"), None);
    }
}
