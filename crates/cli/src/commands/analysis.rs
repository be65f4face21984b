//! Budget, headcount, and retention analysis commands

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use staffledger_business::{PlanningService, RetentionService, ServiceContext};
use staffledger_core::PolicyGate;
use std::path::Path;
use std::sync::Arc;

use crate::db;

/// Budget compliance check for one department
pub async fn budget_check(
    db_path: &Path,
    actor: &str,
    gate: Arc<dyn PolicyGate>,
    department_id: i64,
    percent: Decimal,
) -> Result<()> {
    let ledger = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&ledger, gate);
    let service = PlanningService::new(&ctx);

    let compliance = service
        .check_budget_compliance(actor, department_id, percent)
        .await?;

    println!("📋 Budget Compliance (department {department_id}, +{percent}%)");
    println!("   Current total:  {}", compliance.current_total);
    println!("   Proposed total: {}", compliance.proposed_total);
    println!("   Budget:         {}", compliance.budget);
    println!("   Utilization:    {}%", compliance.utilization_percent);
    println!("   Status:         {}", compliance.status);
    println!(
        "   Within budget:  {}",
        if compliance.is_within_budget { "yes" } else { "no" }
    );
    Ok(())
}

/// Headcount recommendation for one department
pub async fn headcount(
    db_path: &Path,
    actor: &str,
    gate: Arc<dyn PolicyGate>,
    department_id: i64,
) -> Result<()> {
    let ledger = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&ledger, gate);
    let service = PlanningService::new(&ctx);

    let plan = service
        .calculate_optimal_headcount(actor, department_id)
        .await?;

    println!("👥 Headcount Plan (department {department_id})");
    println!("   Current headcount:  {}", plan.current_headcount);
    println!("   Average salary:     {}", plan.average_salary.round_dp(2));
    println!("   Budget:             {}", plan.budget);
    println!("   Active projects:    {}", plan.active_projects);
    println!("   Workload score:     {:.1}", plan.workload_score);
    println!("   Recommended:        {}", plan.recommended_headcount);
    println!("   Recommendation:     {}", plan.recommendation);
    Ok(())
}

/// Retention risk assessment across all active employees
pub async fn retention(
    db_path: &Path,
    actor: &str,
    gate: Arc<dyn PolicyGate>,
    as_of: NaiveDate,
) -> Result<()> {
    let ledger = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&ledger, gate);
    let service = RetentionService::new(&ctx);

    let assessments = service.retention_risk(actor, as_of).await?;

    println!("🔍 Retention Risk (as of {as_of})");
    println!();

    if assessments.is_empty() {
        println!("   No active employees to assess");
        return Ok(());
    }

    println!(
        "{:<5} {:<20} {:>6} {:>11} {:>7}  {}",
        "ID", "Name", "Dept", "Percentile", "Months", "Tier"
    );
    for a in &assessments {
        println!(
            "{:<5} {:<20} {:>6} {:>11.2} {:>7}  {}",
            a.employee_id,
            a.employee_name,
            a.department_id
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            a.salary_percentile,
            a.tenure_months,
            a.tier,
        );
    }
    println!();
    let high = assessments
        .iter()
        .filter(|a| a.tier == staffledger_core::RiskTier::High)
        .count();
    println!("   {} assessed, {} high risk", assessments.len(), high);
    Ok(())
}
