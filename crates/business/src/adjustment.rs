//! Salary adjustment orchestration.
//!
//! Applies the tiered adjustment policy to the ledger as one atomic
//! operation: selection, per-employee evaluation, salary writes, and
//! audit entries all run on a single transaction. Any failure rolls the
//! whole batch back; no partial salary changes survive.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use staffledger_core::{AdjustmentParams, AdjustmentRule, Capability, Employee};
use staffledger_persistence::{AuditRecorder, EmployeeRepo};

/// One applied adjustment within a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeAdjustment {
    pub employee_id: i64,
    pub employee_name: String,
    pub old_salary: Decimal,
    pub new_salary: Decimal,
    pub rule: AdjustmentRule,
}

/// Result of one adjustment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentReport {
    pub as_of: NaiveDate,
    pub adjustments: Vec<EmployeeAdjustment>,
}

impl AdjustmentReport {
    pub fn adjusted_count(&self) -> usize {
        self.adjustments.len()
    }
}

/// Adjustment Orchestrator - the only write path to employee salaries
pub struct AdjustmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdjustmentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Flat percentage adjustment, optionally limited to one department.
    pub async fn adjust_salaries(
        &self,
        actor: &str,
        department_id: Option<i64>,
        percent: Decimal,
        as_of: NaiveDate,
    ) -> BusinessResult<AdjustmentReport> {
        let mut params = AdjustmentParams::flat(percent);
        params.department_id = department_id;
        self.run(actor, params, as_of).await
    }

    /// Tiered adjustment with cap, thresholds, and tenure acceleration.
    pub async fn enhanced_adjust_salaries(
        &self,
        actor: &str,
        params: AdjustmentParams,
        as_of: NaiveDate,
    ) -> BusinessResult<AdjustmentReport> {
        self.run(actor, params, as_of).await
    }

    async fn run(
        &self,
        actor: &str,
        params: AdjustmentParams,
        as_of: NaiveDate,
    ) -> BusinessResult<AdjustmentReport> {
        self.ctx.authorize(actor, Capability::AdjustSalaries)?;

        let mut tx = self.ctx.pool().begin().await.map_err(|e| {
            BusinessError::CommitFailed(format!("failed to begin transaction: {e}"))
        })?;

        let rows = EmployeeRepo::list_active(&mut tx, params.department_id).await?;

        let mut adjustments = Vec::new();
        for row in rows {
            let employee = Employee::try_from(row)?;
            if !params.selects(&employee, as_of) {
                continue;
            }

            let decision = params.evaluate(employee.salary, employee.tenure_years(as_of));

            // Any failure here drops the transaction and rolls back the
            // whole batch, including all earlier writes.
            EmployeeRepo::update_salary(&mut tx, employee.id, decision.new_salary).await?;
            AuditRecorder::record_change(
                &mut tx,
                employee.id,
                employee.salary,
                employee.department_id,
                decision.new_salary,
                employee.department_id,
                actor,
            )
            .await?;

            adjustments.push(EmployeeAdjustment {
                employee_id: employee.id,
                employee_name: employee.name,
                old_salary: employee.salary,
                new_salary: decision.new_salary,
                rule: decision.rule,
            });
        }

        tx.commit()
            .await
            .map_err(|e| BusinessError::CommitFailed(e.to_string()))?;

        tracing::info!(
            actor,
            adjusted = adjustments.len(),
            percent = %params.percent,
            "salary adjustment committed"
        );

        Ok(AdjustmentReport { as_of, adjustments })
    }
}
