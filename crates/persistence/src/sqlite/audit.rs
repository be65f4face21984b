//! Audit log - append-only before/after entries for employee mutations.
//!
//! The recorder runs inside the caller's transaction, so an entry
//! commits if and only if the mutation it describes commits.

use crate::error::PersistenceResult;
use crate::sqlite::schema::AuditRow;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqliteConnection;
use staffledger_core::{
    salary_or_department_changed, AuditOperation, Employee, EmployeeAuditSnapshot,
};

const EMPLOYEES_TABLE: &str = "employees";

/// Repository for the `audit_log` table (append-only)
pub struct AuditRepo;

impl AuditRepo {
    async fn append(
        conn: &mut SqliteConnection,
        table_name: &str,
        record_id: i64,
        operation: AuditOperation,
        old_value: Option<String>,
        new_value: Option<String>,
        changed_by: &str,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO audit_log (table_name, record_id, operation, old_value, new_value, changed_by, changed_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(table_name)
        .bind(record_id)
        .bind(operation.as_str())
        .bind(old_value)
        .bind(new_value)
        .bind(changed_by)
        .bind(Utc::now())
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn list_for_record(
        conn: &mut SqliteConnection,
        table_name: &str,
        record_id: i64,
    ) -> PersistenceResult<Vec<AuditRow>> {
        let rows = sqlx::query_as::<_, AuditRow>(
            "SELECT * FROM audit_log WHERE table_name = ? AND record_id = ? ORDER BY id",
        )
        .bind(table_name)
        .bind(record_id)
        .fetch_all(conn)
        .await?;
        Ok(rows)
    }

    pub async fn count(conn: &mut SqliteConnection) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audit_log")
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }
}

/// Audit hook invoked by the orchestrator at the point of commit.
///
/// Explicit rather than trigger-based, so no write path can bypass it:
/// the only code that mutates `employees.salary` calls through here.
pub struct AuditRecorder;

impl AuditRecorder {
    /// Append one entry iff the salary or department actually changed.
    ///
    /// Departments compare with null-as-zero semantics. Returns whether
    /// an entry was written; an update to identical values writes
    /// nothing.
    pub async fn record_change(
        conn: &mut SqliteConnection,
        employee_id: i64,
        old_salary: Decimal,
        old_department: Option<i64>,
        new_salary: Decimal,
        new_department: Option<i64>,
        actor: &str,
    ) -> PersistenceResult<bool> {
        if !salary_or_department_changed(old_salary, new_salary, old_department, new_department) {
            return Ok(false);
        }

        let old_value = serde_json::to_string(&EmployeeAuditSnapshot {
            salary: old_salary,
            department_id: old_department,
        })?;
        let new_value = serde_json::to_string(&EmployeeAuditSnapshot {
            salary: new_salary,
            department_id: new_department,
        })?;

        AuditRepo::append(
            conn,
            EMPLOYEES_TABLE,
            employee_id,
            AuditOperation::Update,
            Some(old_value),
            Some(new_value),
            actor,
        )
        .await?;
        Ok(true)
    }

    /// Record a freshly hired employee
    pub async fn record_insert(
        conn: &mut SqliteConnection,
        employee: &Employee,
        actor: &str,
    ) -> PersistenceResult<()> {
        let new_value = serde_json::to_string(employee)?;
        AuditRepo::append(
            conn,
            EMPLOYEES_TABLE,
            employee.id,
            AuditOperation::Insert,
            None,
            Some(new_value),
            actor,
        )
        .await?;
        Ok(())
    }

    /// Record a logical delete. The row survives, so this is an update
    /// whose after-snapshot carries the flipped active flag.
    pub async fn record_deactivation(
        conn: &mut SqliteConnection,
        employee: &Employee,
        actor: &str,
    ) -> PersistenceResult<()> {
        let old_value = serde_json::to_string(employee)?;
        let mut deactivated = employee.clone();
        deactivated.is_active = false;
        let new_value = serde_json::to_string(&deactivated)?;
        AuditRepo::append(
            conn,
            EMPLOYEES_TABLE,
            employee.id,
            AuditOperation::Update,
            Some(old_value),
            Some(new_value),
            actor,
        )
        .await?;
        Ok(())
    }
}
