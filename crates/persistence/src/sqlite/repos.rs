//! Repository implementations for SQLite
//!
//! CRUD operations for all tables. Every method takes a
//! `&mut SqliteConnection` so the same calls compose inside a
//! transaction (`&mut *tx`) and outside one (`&mut *pool.acquire()`).
//! Payroll and audit tables are append-only: no update or delete
//! methods exist for them anywhere in this crate.

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqliteConnection;
use staffledger_core::{Department, Employee, PayrollRecord, Project};

// ============================================================================
// Department Repository
// ============================================================================

/// Repository for the `departments` table
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a department, returning its assigned id
    pub async fn insert(
        conn: &mut SqliteConnection,
        department: &Department,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query(
            "INSERT INTO departments (name, budget, location) VALUES (?, ?, ?)",
        )
        .bind(&department.name)
        .bind(department.budget.to_string())
        .bind(&department.location)
        .execute(conn)
        .await
        .map_err(unique_violation("departments.name"))?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> PersistenceResult<DepartmentRow> {
        sqlx::query_as::<_, DepartmentRow>("SELECT * FROM departments WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Department", id))
    }

    pub async fn get_by_name(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> PersistenceResult<DepartmentRow> {
        sqlx::query_as::<_, DepartmentRow>("SELECT * FROM departments WHERE name = ?")
            .bind(name)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Department", name))
    }

    pub async fn get_all(conn: &mut SqliteConnection) -> PersistenceResult<Vec<DepartmentRow>> {
        let rows = sqlx::query_as::<_, DepartmentRow>("SELECT * FROM departments ORDER BY name")
            .fetch_all(conn)
            .await?;
        Ok(rows)
    }

    pub async fn count(conn: &mut SqliteConnection) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM departments")
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Employee Repository
// ============================================================================

/// Repository for the `employees` table
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert an employee, returning its assigned id
    pub async fn insert(
        conn: &mut SqliteConnection,
        employee: &Employee,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (name, email, hire_date, salary, department_id, is_active)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(employee.hire_date)
        .bind(employee.salary.to_string())
        .bind(employee.department_id)
        .bind(employee.is_active)
        .execute(conn)
        .await
        .map_err(unique_violation("employees.email"))?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> PersistenceResult<EmployeeRow> {
        sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Employee", id))
    }

    /// All active employees, optionally restricted to one department
    pub async fn list_active(
        conn: &mut SqliteConnection,
        department_id: Option<i64>,
    ) -> PersistenceResult<Vec<EmployeeRow>> {
        let rows = match department_id {
            Some(dept) => {
                sqlx::query_as::<_, EmployeeRow>(
                    "SELECT * FROM employees WHERE is_active = 1 AND department_id = ? ORDER BY id",
                )
                .bind(dept)
                .fetch_all(conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, EmployeeRow>(
                    "SELECT * FROM employees WHERE is_active = 1 ORDER BY id",
                )
                .fetch_all(conn)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn get_all(conn: &mut SqliteConnection) -> PersistenceResult<Vec<EmployeeRow>> {
        let rows = sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees ORDER BY id")
            .fetch_all(conn)
            .await?;
        Ok(rows)
    }

    /// Apply a salary update to one employee.
    ///
    /// Fails with `NotFound` for an absent id and `InactiveRecord` for
    /// an inactive employee; callers run this inside a transaction so
    /// either failure rolls the whole batch back.
    pub async fn update_salary(
        conn: &mut SqliteConnection,
        id: i64,
        new_salary: Decimal,
    ) -> PersistenceResult<()> {
        if new_salary <= Decimal::ZERO {
            return Err(staffledger_core::CoreError::NonPositiveSalary(new_salary).into());
        }
        let result = sqlx::query("UPDATE employees SET salary = ? WHERE id = ? AND is_active = 1")
            .bind(new_salary.to_string())
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            // Distinguish missing from inactive
            let exists: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM employees WHERE id = ?")
                    .bind(id)
                    .fetch_optional(conn)
                    .await?;
            return Err(match exists {
                Some(_) => PersistenceError::inactive("Employee", id),
                None => PersistenceError::not_found("Employee", id),
            });
        }
        Ok(())
    }

    pub async fn update_department(
        conn: &mut SqliteConnection,
        id: i64,
        department_id: Option<i64>,
    ) -> PersistenceResult<()> {
        let result = sqlx::query("UPDATE employees SET department_id = ? WHERE id = ?")
            .bind(department_id)
            .bind(id)
            .execute(conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Employee", id));
        }
        Ok(())
    }

    /// Logical delete: flip the active flag. No physical delete exists.
    pub async fn set_active(
        conn: &mut SqliteConnection,
        id: i64,
        active: bool,
    ) -> PersistenceResult<()> {
        let result = sqlx::query("UPDATE employees SET is_active = ? WHERE id = ?")
            .bind(active)
            .bind(id)
            .execute(conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Employee", id));
        }
        Ok(())
    }

    /// Active salaries of one department partition, ascending.
    ///
    /// The statistics primitive behind percentile ranking; also feeds
    /// budget totals and headcount averages.
    pub async fn active_salaries(
        conn: &mut SqliteConnection,
        department_id: Option<i64>,
    ) -> PersistenceResult<Vec<Decimal>> {
        let rows = Self::list_active(conn, department_id).await?;
        let mut salaries = rows
            .iter()
            .map(|r| parse_decimal(&r.salary))
            .collect::<PersistenceResult<Vec<Decimal>>>()?;
        salaries.sort();
        Ok(salaries)
    }

    pub async fn count(conn: &mut SqliteConnection) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees")
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Project Repository
// ============================================================================

/// Repository for the `projects` table
pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn insert(conn: &mut SqliteConnection, project: &Project) -> PersistenceResult<i64> {
        let result = sqlx::query(
            "INSERT INTO projects (department_id, name, status) VALUES (?, ?, ?)",
        )
        .bind(project.department_id)
        .bind(&project.name)
        .bind(project.status.as_str())
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_all(conn: &mut SqliteConnection) -> PersistenceResult<Vec<ProjectRow>> {
        let rows = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects ORDER BY id")
            .fetch_all(conn)
            .await?;
        Ok(rows)
    }

    /// Count of active projects across the whole ledger.
    ///
    /// Deliberately NOT scoped to a department: the legacy headcount
    /// procedure filtered on a tautology and counted every active
    /// project, and that behavior is kept until the product owner rules
    /// on the intended scope.
    /// TODO: scope to `department_id` once the intended filter is confirmed.
    pub async fn count_active(conn: &mut SqliteConnection) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE status = 'active'")
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }

    pub async fn count(conn: &mut SqliteConnection) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Payroll Repository
// ============================================================================

/// Repository for the `payroll_records` table (append-only)
pub struct PayrollRepo;

impl PayrollRepo {
    pub async fn insert(
        conn: &mut SqliteConnection,
        record: &PayrollRecord,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO payroll_records (employee_id, pay_date, base_salary, bonus, deductions, tax)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.employee_id)
        .bind(record.pay_date)
        .bind(record.base_salary.to_string())
        .bind(record.bonus.to_string())
        .bind(record.deductions.to_string())
        .bind(record.tax.to_string())
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Records whose pay date falls in `[from, to)`
    pub async fn list_in_range(
        conn: &mut SqliteConnection,
        from: NaiveDate,
        to: NaiveDate,
    ) -> PersistenceResult<Vec<PayrollRow>> {
        let rows = sqlx::query_as::<_, PayrollRow>(
            "SELECT * FROM payroll_records WHERE pay_date >= ? AND pay_date < ? ORDER BY id",
        )
        .bind(from)
        .bind(to)
        .fetch_all(conn)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_employee(
        conn: &mut SqliteConnection,
        employee_id: i64,
    ) -> PersistenceResult<Vec<PayrollRow>> {
        let rows = sqlx::query_as::<_, PayrollRow>(
            "SELECT * FROM payroll_records WHERE employee_id = ? ORDER BY pay_date DESC",
        )
        .bind(employee_id)
        .fetch_all(conn)
        .await?;
        Ok(rows)
    }

    pub async fn count(conn: &mut SqliteConnection) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM payroll_records")
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }
}

/// Map sqlite unique-constraint failures to a typed violation
fn unique_violation(constraint: &'static str) -> impl Fn(sqlx::Error) -> PersistenceError {
    move |err| match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            PersistenceError::UniqueViolation(constraint.to_string())
        }
        _ => PersistenceError::Database(err),
    }
}
