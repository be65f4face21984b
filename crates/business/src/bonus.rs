//! Performance bonus calculation and award.
//!
//! Calculation is read-only; awarding additionally appends a payroll
//! record inside one transaction.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use staffledger_core::{
    performance_bonus, BonusStatus, Capability, Employee, PayrollRecord,
    DEFAULT_BASE_BONUS_PERCENT,
};
use staffledger_persistence::{EmployeeRepo, PayrollRepo};

/// Bonus figures for one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeBonus {
    pub employee_id: i64,
    pub employee_name: String,
    pub salary: Decimal,
    pub rating: u8,
    pub tenure_years: i32,
    pub tenure_multiplier: Decimal,
    pub amount: Decimal,
    pub status: BonusStatus,
}

pub struct BonusService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BonusService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Compute the bonus for one employee without persisting anything.
    pub async fn calculate_bonus(
        &self,
        actor: &str,
        employee_id: i64,
        rating: u8,
        base_percent: Option<Decimal>,
        as_of: NaiveDate,
    ) -> BusinessResult<EmployeeBonus> {
        self.ctx.authorize(actor, Capability::ManagePayroll)?;

        let mut conn = self.ctx.pool().acquire().await?;
        let employee = Employee::try_from(EmployeeRepo::get_by_id(&mut conn, employee_id).await?)?;
        if !employee.is_active {
            return Err(BusinessError::InactiveEmployee(employee_id).into());
        }

        let tenure_years = employee.tenure_years(as_of);
        let base = base_percent.unwrap_or(DEFAULT_BASE_BONUS_PERCENT);
        let result = performance_bonus(employee.salary, rating, base, tenure_years);

        Ok(EmployeeBonus {
            employee_id: employee.id,
            employee_name: employee.name,
            salary: employee.salary,
            rating,
            tenure_years,
            tenure_multiplier: result.tenure_multiplier,
            amount: result.amount,
            status: result.status,
        })
    }

    /// Compute and persist a bonus as a payroll record.
    ///
    /// The record carries the employee's current salary as base pay and
    /// the computed bonus; deductions and tax are zero for an award run
    /// outside the regular pay cycle. A zero bonus persists nothing.
    pub async fn award_bonus(
        &self,
        actor: &str,
        employee_id: i64,
        rating: u8,
        base_percent: Option<Decimal>,
        pay_date: NaiveDate,
    ) -> BusinessResult<EmployeeBonus> {
        self.ctx.authorize(actor, Capability::ManagePayroll)?;

        let mut tx = self.ctx.pool().begin().await.map_err(|e| {
            BusinessError::CommitFailed(format!("failed to begin transaction: {e}"))
        })?;

        let employee = Employee::try_from(EmployeeRepo::get_by_id(&mut tx, employee_id).await?)?;
        if !employee.is_active {
            return Err(BusinessError::InactiveEmployee(employee_id).into());
        }

        let tenure_years = employee.tenure_years(pay_date);
        let base = base_percent.unwrap_or(DEFAULT_BASE_BONUS_PERCENT);
        let result = performance_bonus(employee.salary, rating, base, tenure_years);

        if result.amount > Decimal::ZERO {
            let record = PayrollRecord::new(
                0,
                employee.id,
                pay_date,
                employee.salary,
                result.amount,
                Decimal::ZERO,
                Decimal::ZERO,
            )?;
            PayrollRepo::insert(&mut tx, &record).await?;
        }

        tx.commit()
            .await
            .map_err(|e| BusinessError::CommitFailed(e.to_string()))?;

        tracing::info!(
            actor,
            employee_id,
            rating,
            amount = %result.amount,
            status = %result.status,
            "bonus awarded"
        );

        Ok(EmployeeBonus {
            employee_id: employee.id,
            employee_name: employee.name,
            salary: employee.salary,
            rating,
            tenure_years,
            tenure_multiplier: result.tenure_multiplier,
            amount: result.amount,
            status: result.status,
        })
    }
}
