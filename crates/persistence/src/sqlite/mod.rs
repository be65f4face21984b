//! SQLite persistence module
//!
//! Repository pattern over the ledger tables.

pub mod audit;
pub mod repos;
pub mod schema;

pub use audit::{AuditRecorder, AuditRepo};
pub use repos::{DepartmentRepo, EmployeeRepo, PayrollRepo, ProjectRepo};
pub use schema::{AuditRow, DepartmentRow, EmployeeRow, PayrollRow, ProjectRow};

use crate::error::PersistenceResult;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::str::FromStr;

/// Schema for the ledger tables. Monetary columns are TEXT-encoded
/// decimals; `payroll_records` and `audit_log` are append-only.
const SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS departments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        budget TEXT NOT NULL DEFAULT '0',
        location TEXT
    );

    CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        hire_date DATE NOT NULL,
        salary TEXT NOT NULL,
        department_id INTEGER,
        is_active INTEGER NOT NULL DEFAULT 1,
        FOREIGN KEY (department_id) REFERENCES departments(id)
    );

    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        department_id INTEGER,
        name TEXT NOT NULL,
        status TEXT NOT NULL,
        FOREIGN KEY (department_id) REFERENCES departments(id)
    );

    CREATE TABLE IF NOT EXISTS payroll_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        pay_date DATE NOT NULL,
        base_salary TEXT NOT NULL,
        bonus TEXT NOT NULL DEFAULT '0',
        deductions TEXT NOT NULL DEFAULT '0',
        tax TEXT NOT NULL DEFAULT '0',
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (employee_id) REFERENCES employees(id)
    );

    CREATE TABLE IF NOT EXISTS audit_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        table_name TEXT NOT NULL,
        record_id INTEGER NOT NULL,
        operation TEXT NOT NULL,
        old_value TEXT,
        new_value TEXT,
        changed_by TEXT NOT NULL,
        changed_at DATETIME DEFAULT CURRENT_TIMESTAMP
    );

    CREATE INDEX IF NOT EXISTS idx_employees_department ON employees(department_id);
    CREATE INDEX IF NOT EXISTS idx_payroll_pay_date ON payroll_records(pay_date);
    CREATE INDEX IF NOT EXISTS idx_audit_record ON audit_log(table_name, record_id);
"#;

/// Open a connection pool for an existing database
pub async fn create_pool(database_url: &str) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePool::connect(database_url).await?;
    Ok(pool)
}

/// Apply the schema to a pool
pub async fn create_schema(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    tracing::debug!("ledger schema applied");
    Ok(())
}

/// Create (if missing) and initialize a database
pub async fn init_database(database_url: &str) -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;
    create_schema(&pool).await?;
    Ok(pool)
}
