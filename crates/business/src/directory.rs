//! Employee directory administration.
//!
//! Hires, deactivations, and department reassignments. Every mutation
//! runs in a transaction and leaves an audit entry; deactivation is
//! logical, the row stays for history.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use staffledger_core::{Capability, Department, Employee, EmployeeFilter};
use staffledger_persistence::{AuditRecorder, DepartmentRepo, EmployeeRepo};

pub struct DirectoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DirectoryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Hire a new employee. The department, when given, must exist.
    pub async fn hire(
        &self,
        actor: &str,
        name: &str,
        email: &str,
        hire_date: NaiveDate,
        salary: Decimal,
        department_id: Option<i64>,
    ) -> BusinessResult<Employee> {
        self.ctx.authorize(actor, Capability::ManageEmployees)?;

        let mut tx = self.ctx.pool().begin().await.map_err(|e| {
            BusinessError::CommitFailed(format!("failed to begin transaction: {e}"))
        })?;

        if let Some(dept) = department_id {
            DepartmentRepo::get_by_id(&mut tx, dept).await?;
        }

        let mut employee = Employee::new(0, name, email, hire_date, salary, department_id)?;
        employee.id = EmployeeRepo::insert(&mut tx, &employee).await?;
        AuditRecorder::record_insert(&mut tx, &employee, actor).await?;

        tx.commit()
            .await
            .map_err(|e| BusinessError::CommitFailed(e.to_string()))?;

        tracing::info!(actor, employee_id = employee.id, "employee hired");
        Ok(employee)
    }

    /// Logical delete. The row and its payroll and audit history remain.
    pub async fn deactivate(&self, actor: &str, employee_id: i64) -> BusinessResult<()> {
        self.ctx.authorize(actor, Capability::ManageEmployees)?;

        let mut tx = self.ctx.pool().begin().await.map_err(|e| {
            BusinessError::CommitFailed(format!("failed to begin transaction: {e}"))
        })?;

        let employee = Employee::try_from(EmployeeRepo::get_by_id(&mut tx, employee_id).await?)?;
        if !employee.is_active {
            return Err(BusinessError::InactiveEmployee(employee_id).into());
        }

        EmployeeRepo::set_active(&mut tx, employee_id, false).await?;
        AuditRecorder::record_deactivation(&mut tx, &employee, actor).await?;

        tx.commit()
            .await
            .map_err(|e| BusinessError::CommitFailed(e.to_string()))?;

        tracing::info!(actor, employee_id, "employee deactivated");
        Ok(())
    }

    /// Move an employee to another department (or unassign with `None`).
    pub async fn reassign(
        &self,
        actor: &str,
        employee_id: i64,
        department_id: Option<i64>,
    ) -> BusinessResult<()> {
        self.ctx.authorize(actor, Capability::ManageEmployees)?;

        let mut tx = self.ctx.pool().begin().await.map_err(|e| {
            BusinessError::CommitFailed(format!("failed to begin transaction: {e}"))
        })?;

        if let Some(dept) = department_id {
            DepartmentRepo::get_by_id(&mut tx, dept).await?;
        }

        let employee = Employee::try_from(EmployeeRepo::get_by_id(&mut tx, employee_id).await?)?;
        EmployeeRepo::update_department(&mut tx, employee_id, department_id).await?;
        AuditRecorder::record_change(
            &mut tx,
            employee_id,
            employee.salary,
            employee.department_id,
            employee.salary,
            department_id,
            actor,
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| BusinessError::CommitFailed(e.to_string()))?;
        Ok(())
    }

    /// Active employees, optionally scoped to one department.
    pub async fn list_active(
        &self,
        actor: &str,
        department_id: Option<i64>,
    ) -> BusinessResult<Vec<Employee>> {
        self.ctx
            .authorize(actor, Capability::ViewDepartmentSummary)?;

        let mut conn = self.ctx.pool().acquire().await?;
        let rows = EmployeeRepo::list_active(&mut conn, department_id).await?;
        let employees = rows
            .into_iter()
            .map(Employee::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    /// Active employees matching a conjunctive filter.
    pub async fn search(
        &self,
        actor: &str,
        filter: &EmployeeFilter,
        as_of: NaiveDate,
    ) -> BusinessResult<Vec<Employee>> {
        let employees = self.list_active(actor, filter.department_id).await?;
        Ok(employees
            .into_iter()
            .filter(|e| filter.matches(e, as_of))
            .collect())
    }

    /// All departments, ordered by name.
    pub async fn departments(&self, actor: &str) -> BusinessResult<Vec<Department>> {
        self.ctx
            .authorize(actor, Capability::ViewDepartmentSummary)?;

        let mut conn = self.ctx.pool().acquire().await?;
        let rows = DepartmentRepo::get_all(&mut conn).await?;
        let departments = rows
            .into_iter()
            .map(Department::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(departments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use staffledger_core::AllowAll;
    use staffledger_persistence::{AuditRepo, Ledger};
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn fixture() -> (Ledger, i64) {
        let ledger = Ledger::in_memory().await.unwrap();
        let dept_id = {
            let mut conn = ledger.acquire().await.unwrap();
            let dept = Department::new(0, "Engineering", dec!(500000), None).unwrap();
            DepartmentRepo::insert(&mut conn, &dept).await.unwrap()
        };
        (ledger, dept_id)
    }

    #[tokio::test]
    async fn test_hire_writes_audit_entry() {
        let (ledger, dept) = fixture().await;
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = DirectoryService::new(&ctx);

        let employee = service
            .hire("alice", "Ana", "ana@corp.test", d(2026, 1, 1), dec!(5000), Some(dept))
            .await
            .unwrap();
        assert!(employee.id > 0);

        let mut conn = ledger.acquire().await.unwrap();
        let entries = AuditRepo::list_for_record(&mut conn, "employees", employee.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, "insert");
    }

    #[tokio::test]
    async fn test_hire_into_unknown_department_fails() {
        let (ledger, _) = fixture().await;
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = DirectoryService::new(&ctx);

        let err = service
            .hire("alice", "Ana", "ana@corp.test", d(2026, 1, 1), dec!(5000), Some(99))
            .await
            .unwrap_err();
        let persistence = err
            .downcast_ref::<staffledger_persistence::PersistenceError>()
            .unwrap();
        assert!(persistence.is_not_found());

        // Nothing committed
        let mut conn = ledger.acquire().await.unwrap();
        assert_eq!(EmployeeRepo::count(&mut conn).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deactivate_is_logical_and_idempotency_guarded() {
        let (ledger, dept) = fixture().await;
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = DirectoryService::new(&ctx);

        let employee = service
            .hire("alice", "Ana", "ana@corp.test", d(2026, 1, 1), dec!(5000), Some(dept))
            .await
            .unwrap();
        service.deactivate("alice", employee.id).await.unwrap();

        // Row stays; the audit trail records an update with the flag flip
        let mut conn = ledger.acquire().await.unwrap();
        let row = EmployeeRepo::get_by_id(&mut conn, employee.id).await.unwrap();
        assert!(!row.is_active);

        let entries = AuditRepo::list_for_record(&mut conn, "employees", employee.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, "update");
        let before = entries[1].old_value.as_deref().unwrap();
        let after = entries[1].new_value.as_deref().unwrap();
        assert!(before.contains("\"is_active\":true"));
        assert!(after.contains("\"is_active\":false"));
        drop(conn);

        // Second deactivation is an invalid-state error
        let err = service.deactivate("alice", employee.id).await.unwrap_err();
        let business = err.downcast_ref::<BusinessError>().unwrap();
        assert!(matches!(business, BusinessError::InactiveEmployee(_)));
    }

    #[tokio::test]
    async fn test_search_applies_salary_and_tenure_filter() {
        let (ledger, dept) = fixture().await;
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = DirectoryService::new(&ctx);

        service
            .hire("alice", "Ana", "ana@corp.test", d(2018, 1, 1), dec!(7000), Some(dept))
            .await
            .unwrap();
        service
            .hire("alice", "Ben", "ben@corp.test", d(2025, 1, 1), dec!(7000), Some(dept))
            .await
            .unwrap();
        service
            .hire("alice", "Cho", "cho@corp.test", d(2018, 1, 1), dec!(3000), Some(dept))
            .await
            .unwrap();

        let filter = EmployeeFilter::new()
            .with_department(dept)
            .with_salary_range(Some(dec!(5000)), None)
            .with_min_tenure(5);
        let matches = service
            .search("alice", &filter, d(2026, 6, 1))
            .await
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Ana");
    }

    #[tokio::test]
    async fn test_reassign_records_department_change() {
        let (ledger, dept) = fixture().await;
        let other = {
            let mut conn = ledger.acquire().await.unwrap();
            let d = Department::new(0, "Sales", dec!(100000), None).unwrap();
            DepartmentRepo::insert(&mut conn, &d).await.unwrap()
        };
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = DirectoryService::new(&ctx);

        let employee = service
            .hire("alice", "Ana", "ana@corp.test", d(2026, 1, 1), dec!(5000), Some(dept))
            .await
            .unwrap();
        service
            .reassign("alice", employee.id, Some(other))
            .await
            .unwrap();

        let mut conn = ledger.acquire().await.unwrap();
        let row = EmployeeRepo::get_by_id(&mut conn, employee.id).await.unwrap();
        assert_eq!(row.department_id, Some(other));

        let entries = AuditRepo::list_for_record(&mut conn, "employees", employee.id)
            .await
            .unwrap();
        // insert + department change
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, "update");
    }
}
