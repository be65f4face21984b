//! Salary adjustment and bonus commands

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use staffledger_business::{AdjustmentReport, AdjustmentService, BonusService, ServiceContext};
use staffledger_core::{AdjustmentParams, PolicyGate};
use std::path::Path;
use std::sync::Arc;

use crate::db;

/// Parameters for the tiered adjustment
pub struct EnhancedArgs {
    pub percent: Decimal,
    pub department: Option<i64>,
    pub cap: Option<Decimal>,
    pub min_salary: Option<Decimal>,
    pub max_salary: Option<Decimal>,
    pub min_tenure: Option<i32>,
}

/// Flat percentage adjustment
pub async fn flat(
    db_path: &Path,
    actor: &str,
    gate: Arc<dyn PolicyGate>,
    percent: Decimal,
    department: Option<i64>,
    as_of: NaiveDate,
) -> Result<()> {
    let ledger = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&ledger, gate);
    let service = AdjustmentService::new(&ctx);

    let report = service
        .adjust_salaries(actor, department, percent, as_of)
        .await?;
    print_adjustments(&report, percent);
    Ok(())
}

/// Tiered adjustment with cap and thresholds
pub async fn enhanced(
    db_path: &Path,
    actor: &str,
    gate: Arc<dyn PolicyGate>,
    args: EnhancedArgs,
    as_of: NaiveDate,
) -> Result<()> {
    let ledger = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&ledger, gate);
    let service = AdjustmentService::new(&ctx);

    let mut params = AdjustmentParams::flat(args.percent);
    params.department_id = args.department;
    params.cap_amount = args.cap;
    params.min_salary_threshold = args.min_salary;
    params.max_salary_threshold = args.max_salary;
    params.min_tenure_years = args.min_tenure;

    let report = service.enhanced_adjust_salaries(actor, params, as_of).await?;
    print_adjustments(&report, args.percent);
    Ok(())
}

fn print_adjustments(report: &AdjustmentReport, percent: Decimal) {
    println!("💰 Salary Adjustment ({percent}%)");
    println!("   As of: {}", report.as_of);
    println!();

    if report.adjustments.is_empty() {
        println!("   No employees matched the selection");
        return;
    }

    println!(
        "{:<5} {:<20} {:>10} {:>10}  {}",
        "ID", "Name", "Old", "New", "Rule"
    );
    for a in &report.adjustments {
        println!(
            "{:<5} {:<20} {:>10} {:>10}  {:?}",
            a.employee_id,
            a.employee_name,
            a.old_salary.to_string(),
            a.new_salary.to_string(),
            a.rule,
        );
    }
    println!();
    println!("   {} salary change(s) committed", report.adjusted_count());
}

/// Calculate or award a performance bonus
#[allow(clippy::too_many_arguments)]
pub async fn bonus(
    db_path: &Path,
    actor: &str,
    gate: Arc<dyn PolicyGate>,
    employee_id: i64,
    rating: u8,
    base_percent: Option<Decimal>,
    award: bool,
    pay_date: NaiveDate,
) -> Result<()> {
    let ledger = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&ledger, gate);
    let service = BonusService::new(&ctx);

    let bonus = if award {
        service
            .award_bonus(actor, employee_id, rating, base_percent, pay_date)
            .await?
    } else {
        service
            .calculate_bonus(actor, employee_id, rating, base_percent, pay_date)
            .await?
    };

    println!("🎯 Performance Bonus");
    println!("   Employee:   {} (id {})", bonus.employee_name, bonus.employee_id);
    println!("   Rating:     {}", bonus.rating);
    println!("   Tenure:     {} year(s) (x{})", bonus.tenure_years, bonus.tenure_multiplier);
    println!("   Amount:     {}", bonus.amount);
    println!("   Status:     {}", bonus.status);
    if award {
        println!("   ✅ Recorded as payroll entry dated {}", pay_date);
    }
    Ok(())
}
