//! Retention risk analysis.
//!
//! Computes department-relative salary percentiles and tenure windows
//! over a single ledger snapshot. Assessments are derived on demand and
//! never stored.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use staffledger_core::{
    percentile_rank, risk_tier, Capability, Employee, RetentionAssessment, RiskTier,
};
use staffledger_persistence::EmployeeRepo;
use std::collections::HashMap;

pub struct RetentionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RetentionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Assess retention risk for every active employee.
    ///
    /// Percentiles are computed within each department partition;
    /// unassigned employees form their own partition. Results come back
    /// highest risk first, then by ascending percentile.
    pub async fn retention_risk(
        &self,
        actor: &str,
        as_of: NaiveDate,
    ) -> BusinessResult<Vec<RetentionAssessment>> {
        self.ctx.authorize(actor, Capability::ViewRetentionRisk)?;

        // Snapshot transaction: every partition sees the same ledger state.
        let mut tx = self.ctx.pool().begin().await.map_err(|e| {
            BusinessError::CommitFailed(format!("failed to begin transaction: {e}"))
        })?;
        let rows = EmployeeRepo::list_active(&mut tx, None).await?;

        let employees = rows
            .into_iter()
            .map(Employee::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut partitions: HashMap<Option<i64>, Vec<Decimal>> = HashMap::new();
        for employee in &employees {
            partitions
                .entry(employee.department_id)
                .or_default()
                .push(employee.salary);
        }

        let mut assessments: Vec<RetentionAssessment> = employees
            .iter()
            .map(|employee| {
                let peers = &partitions[&employee.department_id];
                let percentile = percentile_rank(peers, employee.salary);
                let tenure_months = employee.tenure_months(as_of);
                let tier = risk_tier(percentile, tenure_months);
                RetentionAssessment {
                    employee_id: employee.id,
                    employee_name: employee.name.clone(),
                    department_id: employee.department_id,
                    salary_percentile: percentile,
                    tenure_months,
                    in_transition_window: staffledger_core::in_transition_window(tenure_months),
                    tier,
                }
            })
            .collect();

        assessments.sort_by(|a, b| {
            tier_order(a.tier).cmp(&tier_order(b.tier)).then(
                a.salary_percentile
                    .partial_cmp(&b.salary_percentile)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });

        tracing::debug!(
            assessed = assessments.len(),
            high = assessments.iter().filter(|a| a.tier == RiskTier::High).count(),
            "retention risk assessed"
        );
        Ok(assessments)
    }
}

fn tier_order(tier: RiskTier) -> u8 {
    match tier {
        RiskTier::High => 0,
        RiskTier::Medium => 1,
        RiskTier::Potential => 2,
        RiskTier::Low => 3,
    }
}
