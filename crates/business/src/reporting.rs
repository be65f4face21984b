//! Gated report generation.
//!
//! The reports crate holds the read-only projections; this service puts
//! them behind the same capability gate as every other exposed
//! operation, so a caller without the reporting capability cannot read
//! payroll figures through the report path either.

use crate::error::BusinessResult;
use crate::services::ServiceContext;
use chrono::NaiveDate;
use staffledger_core::Capability;
use staffledger_reports::{
    DepartmentSummaryReport, EmployeeDirectoryReport, MonthlyPayrollReport,
};

pub struct ReportingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Monthly payroll totals grouped by department.
    pub async fn monthly_payroll(
        &self,
        actor: &str,
        year: i32,
        month: u32,
    ) -> BusinessResult<MonthlyPayrollReport> {
        self.ctx.authorize(actor, Capability::RunPayrollReport)?;

        let mut conn = self.ctx.pool().acquire().await?;
        Ok(MonthlyPayrollReport::generate(&mut conn, year, month).await?)
    }

    /// Headcount, salary totals, and budget utilization per department.
    pub async fn department_summary(
        &self,
        actor: &str,
    ) -> BusinessResult<DepartmentSummaryReport> {
        self.ctx
            .authorize(actor, Capability::ViewDepartmentSummary)?;

        let mut conn = self.ctx.pool().acquire().await?;
        Ok(DepartmentSummaryReport::generate(&mut conn).await?)
    }

    /// Active employees with their department and tenure.
    pub async fn directory(
        &self,
        actor: &str,
        as_of: NaiveDate,
    ) -> BusinessResult<EmployeeDirectoryReport> {
        self.ctx
            .authorize(actor, Capability::ViewDepartmentSummary)?;

        let mut conn = self.ctx.pool().acquire().await?;
        Ok(EmployeeDirectoryReport::generate(&mut conn, as_of).await?)
    }
}
