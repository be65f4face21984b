//! Database schema definitions
//!
//! Row types for sqlx mapping from SQLite tables. Monetary columns are
//! stored as TEXT; all arithmetic happens in Rust on `Decimal`.

use crate::error::{PersistenceError, PersistenceResult};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use staffledger_core::{
    AuditEntry, AuditOperation, Department, Employee, PayrollRecord, Project, ProjectStatus,
};
use std::str::FromStr;

/// Parse a TEXT money column into a Decimal
pub(crate) fn parse_decimal(value: &str) -> PersistenceResult<Decimal> {
    Decimal::from_str(value).map_err(|_| PersistenceError::InvalidDecimal(value.to_string()))
}

/// Row type for the `departments` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
    pub budget: String, // Decimal stored as TEXT
    pub location: Option<String>,
}

/// Row type for the `employees` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub salary: String, // Decimal stored as TEXT
    pub department_id: Option<i64>,
    pub is_active: bool,
}

/// Row type for the `projects` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: i64,
    pub department_id: Option<i64>,
    pub name: String,
    pub status: String,
}

/// Row type for the `payroll_records` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct PayrollRow {
    pub id: i64,
    pub employee_id: i64,
    pub pay_date: NaiveDate,
    pub base_salary: String, // Decimal stored as TEXT
    pub bonus: String,
    pub deductions: String,
    pub tax: String,
    pub created_at: DateTime<Utc>,
}

/// Row type for the `audit_log` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AuditRow {
    pub id: i64,
    pub table_name: String,
    pub record_id: i64,
    pub operation: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}

// === Conversion implementations ===

impl TryFrom<DepartmentRow> for Department {
    type Error = PersistenceError;

    fn try_from(row: DepartmentRow) -> PersistenceResult<Self> {
        Ok(Department {
            id: row.id,
            name: row.name,
            budget: parse_decimal(&row.budget)?,
            location: row.location,
        })
    }
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = PersistenceError;

    fn try_from(row: EmployeeRow) -> PersistenceResult<Self> {
        Ok(Employee {
            id: row.id,
            name: row.name,
            email: row.email,
            hire_date: row.hire_date,
            salary: parse_decimal(&row.salary)?,
            department_id: row.department_id,
            is_active: row.is_active,
        })
    }
}

impl TryFrom<ProjectRow> for Project {
    type Error = PersistenceError;

    fn try_from(row: ProjectRow) -> PersistenceResult<Self> {
        let status = ProjectStatus::parse(&row.status)?;
        Ok(Project {
            id: row.id,
            department_id: row.department_id,
            name: row.name,
            status,
        })
    }
}

impl TryFrom<PayrollRow> for PayrollRecord {
    type Error = PersistenceError;

    fn try_from(row: PayrollRow) -> PersistenceResult<Self> {
        Ok(PayrollRecord {
            id: row.id,
            employee_id: row.employee_id,
            pay_date: row.pay_date,
            base_salary: parse_decimal(&row.base_salary)?,
            bonus: parse_decimal(&row.bonus)?,
            deductions: parse_decimal(&row.deductions)?,
            tax: parse_decimal(&row.tax)?,
        })
    }
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = PersistenceError;

    fn try_from(row: AuditRow) -> PersistenceResult<Self> {
        let operation = AuditOperation::parse(&row.operation).ok_or_else(|| {
            PersistenceError::InvalidEnumValue {
                field: "operation".to_string(),
                value: row.operation.clone(),
            }
        })?;
        Ok(AuditEntry {
            id: row.id,
            table_name: row.table_name,
            record_id: row.record_id,
            operation,
            old_value: row.old_value,
            new_value: row.new_value,
            changed_by: row.changed_by,
            changed_at: row.changed_at,
        })
    }
}
