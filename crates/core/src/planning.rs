//! # Budget Compliance & Headcount Planning Rules
//!
//! Read-only analytics over a department snapshot. Nothing in this
//! module mutates state.

use crate::error::{CoreError, CoreResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

const SALARY_GROWTH_FACTOR: Decimal = Decimal::from_parts(11, 0, 0, false, 1); // 1.1

// ============================================================================
// Budget compliance
// ============================================================================

/// Budget utilization band for a proposed salary increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    ExceedsBudget,
    Warning90,
    Caution80,
    WithinSafeLimits,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::ExceedsBudget => "Exceeds Budget",
            BudgetStatus::Warning90 => "Warning: Exceeds 90%",
            BudgetStatus::Caution80 => "Caution: Exceeds 80%",
            BudgetStatus::WithinSafeLimits => "Within Safe Limits",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All four figures of a compliance check plus status and flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCompliance {
    pub current_total: Decimal,
    pub proposed_total: Decimal,
    pub budget: Decimal,
    pub utilization_percent: Decimal,
    pub status: BudgetStatus,
    pub is_within_budget: bool,
}

/// Compare a proposed percentage increase against the department budget.
///
/// A zero budget is a typed failure, never a garbage ratio.
pub fn budget_compliance(
    current_total: Decimal,
    budget: Decimal,
    percent_increase: Decimal,
) -> CoreResult<BudgetCompliance> {
    if budget <= Decimal::ZERO {
        return Err(CoreError::DivisionByZero("department budget"));
    }

    let proposed_total =
        (current_total * (Decimal::ONE + percent_increase / Decimal::ONE_HUNDRED)).round_dp(2);
    let utilization_percent = (proposed_total / budget * Decimal::ONE_HUNDRED).round_dp(2);

    let status = if utilization_percent > Decimal::ONE_HUNDRED {
        BudgetStatus::ExceedsBudget
    } else if utilization_percent > Decimal::from(90) {
        BudgetStatus::Warning90
    } else if utilization_percent > Decimal::from(80) {
        BudgetStatus::Caution80
    } else {
        BudgetStatus::WithinSafeLimits
    };

    Ok(BudgetCompliance {
        current_total,
        proposed_total,
        budget,
        utilization_percent,
        status,
        is_within_budget: proposed_total <= budget,
    })
}

// ============================================================================
// Headcount planning
// ============================================================================

/// Hiring recommendation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadcountRecommendation {
    Hire,
    Reduce,
    Optimal,
}

impl HeadcountRecommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadcountRecommendation::Hire => "Hire",
            HeadcountRecommendation::Reduce => "Reduce",
            HeadcountRecommendation::Optimal => "Optimal",
        }
    }
}

impl fmt::Display for HeadcountRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Headcount recommendation for one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadcountPlan {
    pub current_headcount: i64,
    pub average_salary: Decimal,
    pub budget: Decimal,
    pub active_projects: i64,
    pub workload_score: f64,
    pub recommended_headcount: i64,
    pub recommendation: HeadcountRecommendation,
}

/// Derive a headcount recommendation from workload and budget headroom.
///
/// Workload score is `(active projects * 10) / headcount`; an empty
/// department scores 100 as a maximal workload signal instead of
/// dividing by zero. Hiring bands are capped by how many heads the
/// budget affords at the average salary grown by 10%.
pub fn headcount_plan(
    current_headcount: i64,
    average_salary: Decimal,
    budget: Decimal,
    active_projects: i64,
) -> HeadcountPlan {
    let workload_score = if current_headcount == 0 {
        100.0
    } else {
        (active_projects * 10) as f64 / current_headcount as f64
    };

    let affordable_headcount = if average_salary > Decimal::ZERO {
        (budget / (average_salary * SALARY_GROWTH_FACTOR))
            .floor()
            .to_i64()
            .unwrap_or(current_headcount)
    } else {
        current_headcount
    };

    // The <50 band is tested before <80 so both reduction bands are
    // reachable.
    let recommended_headcount = if workload_score > 150.0 {
        (current_headcount + 2).min(affordable_headcount)
    } else if workload_score > 120.0 {
        (current_headcount + 1).min(affordable_headcount)
    } else if workload_score < 50.0 {
        (current_headcount - 2).max(1)
    } else if workload_score < 80.0 {
        (current_headcount - 1).max(1)
    } else {
        current_headcount
    };

    let recommendation = match recommended_headcount.cmp(&current_headcount) {
        std::cmp::Ordering::Greater => HeadcountRecommendation::Hire,
        std::cmp::Ordering::Less => HeadcountRecommendation::Reduce,
        std::cmp::Ordering::Equal => HeadcountRecommendation::Optimal,
    };

    HeadcountPlan {
        current_headcount,
        average_salary,
        budget,
        active_projects,
        workload_score,
        recommended_headcount,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exactly_at_budget_is_warning_but_within() {
        let result = budget_compliance(dec!(100000), dec!(100000), dec!(0)).unwrap();
        assert_eq!(result.proposed_total, dec!(100000.00));
        assert_eq!(result.status, BudgetStatus::Warning90);
        assert!(result.is_within_budget);
    }

    #[test]
    fn test_over_budget() {
        let result = budget_compliance(dec!(100000), dec!(100000), dec!(5)).unwrap();
        assert_eq!(result.status, BudgetStatus::ExceedsBudget);
        assert!(!result.is_within_budget);
    }

    #[test]
    fn test_caution_band() {
        let result = budget_compliance(dec!(85000), dec!(100000), dec!(0)).unwrap();
        assert_eq!(result.status, BudgetStatus::Caution80);
        assert!(result.is_within_budget);
    }

    #[test]
    fn test_safe_band() {
        let result = budget_compliance(dec!(50000), dec!(100000), dec!(10)).unwrap();
        assert_eq!(result.status, BudgetStatus::WithinSafeLimits);
        assert_eq!(result.proposed_total, dec!(55000.00));
    }

    #[test]
    fn test_zero_budget_is_typed_failure() {
        let err = budget_compliance(dec!(1000), dec!(0), dec!(5)).unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn test_high_workload_hires_within_affordability() {
        // 4 heads, 70 active projects -> workload 70 * 10 / 4 = 175
        let plan = headcount_plan(4, dec!(5000), dec!(100000), 70);
        assert!(plan.workload_score > 150.0);
        // budget affords floor(100000 / 5500) = 18, so current + 2 wins
        assert_eq!(plan.recommended_headcount, 6);
        assert_eq!(plan.recommendation, HeadcountRecommendation::Hire);
    }

    #[test]
    fn test_budget_caps_hiring() {
        // 2 heads, 40 projects -> workload 200 says +2, but the budget
        // affords only floor(19800 / 9900) = 2 heads
        let plan = headcount_plan(2, dec!(9000), dec!(19800), 40);
        assert_eq!(plan.recommended_headcount, 2);
        assert_eq!(plan.recommendation, HeadcountRecommendation::Optimal);
    }

    #[test]
    fn test_low_workload_reduces() {
        // 10 heads, 70 active projects -> workload 70
        let plan = headcount_plan(10, dec!(5000), dec!(100000), 70);
        assert_eq!(plan.recommended_headcount, 9);
        assert_eq!(plan.recommendation, HeadcountRecommendation::Reduce);
    }

    #[test]
    fn test_very_low_workload_reduces_by_two() {
        // 10 heads, 40 active projects -> workload 40, below the 50 band
        let plan = headcount_plan(10, dec!(5000), dec!(100000), 40);
        assert_eq!(plan.recommended_headcount, 8);
    }

    #[test]
    fn test_reduction_floors_at_one() {
        let plan = headcount_plan(1, dec!(5000), dec!(100000), 0);
        assert_eq!(plan.recommended_headcount, 1);
    }

    #[test]
    fn test_empty_department_signals_maximal_workload() {
        let plan = headcount_plan(0, dec!(0), dec!(100000), 3);
        assert_eq!(plan.workload_score, 100.0);
        // 100 falls in the unchanged band
        assert_eq!(plan.recommended_headcount, 0);
        assert_eq!(plan.recommendation, HeadcountRecommendation::Optimal);
    }
}
