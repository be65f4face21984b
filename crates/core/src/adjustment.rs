//! # Salary Adjustment Rules
//!
//! Tiered salary adjustment policy, evaluated per employee with
//! first-match-wins branch order:
//!
//! 1. cap set and `salary * pct/100 > cap`    -> salary + cap
//! 2. min threshold set and salary below it   -> salary * 1.15
//! 3. max threshold set and salary above it   -> salary * 1.02
//! 4. tenure requirement met                  -> salary * (1 + (pct+2)/100)
//! 5. otherwise                               -> salary * (1 + pct/100)
//!
//! The thresholds appear in BOTH the selection filter and the branch
//! tests. Both checks must hold for a row to be modified with that
//! branch's formula; the duplication is inherited from the upstream
//! adjustment procedures and is preserved.

use crate::employee::Employee;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const BELOW_MIN_MULTIPLIER: Decimal = Decimal::from_parts(115, 0, 0, false, 2); // 1.15
const ABOVE_MAX_MULTIPLIER: Decimal = Decimal::from_parts(102, 0, 0, false, 2); // 1.02
const TENURE_EXTRA_PERCENT: Decimal = Decimal::TWO;

/// Parameters of one adjustment run.
///
/// A `None` field means "no constraint" for the selection filter and
/// disables the corresponding branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjustmentParams {
    pub percent: Decimal,
    pub department_id: Option<i64>,
    pub cap_amount: Option<Decimal>,
    pub min_salary_threshold: Option<Decimal>,
    pub max_salary_threshold: Option<Decimal>,
    pub min_tenure_years: Option<i32>,
}

impl AdjustmentParams {
    /// Flat percentage adjustment - the non-tiered variant
    pub fn flat(percent: Decimal) -> Self {
        Self {
            percent,
            ..Self::default()
        }
    }

    pub fn with_department(mut self, department_id: i64) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub fn with_cap(mut self, cap_amount: Decimal) -> Self {
        self.cap_amount = Some(cap_amount);
        self
    }

    pub fn with_min_threshold(mut self, threshold: Decimal) -> Self {
        self.min_salary_threshold = Some(threshold);
        self
    }

    pub fn with_max_threshold(mut self, threshold: Decimal) -> Self {
        self.max_salary_threshold = Some(threshold);
        self
    }

    pub fn with_min_tenure(mut self, years: i32) -> Self {
        self.min_tenure_years = Some(years);
        self
    }

    /// Outer selection filter: active, department match, threshold
    /// match, tenure match. All conjunctive; employees that fail any
    /// check are left untouched.
    pub fn selects(&self, employee: &Employee, as_of: NaiveDate) -> bool {
        if !employee.is_active {
            return false;
        }
        if let Some(dept) = self.department_id {
            if employee.department_id != Some(dept) {
                return false;
            }
        }
        if let Some(min) = self.min_salary_threshold {
            if employee.salary >= min {
                return false;
            }
        }
        if let Some(max) = self.max_salary_threshold {
            if employee.salary <= max {
                return false;
            }
        }
        if let Some(years) = self.min_tenure_years {
            if employee.tenure_years(as_of) < years {
                return false;
            }
        }
        true
    }

    /// Evaluate the tiered policy for one selected employee.
    ///
    /// Pure: computes the new salary without touching the ledger.
    /// Results round to 2 decimal places.
    pub fn evaluate(&self, salary: Decimal, tenure_years: i32) -> SalaryDecision {
        let pct = self.percent / Decimal::ONE_HUNDRED;

        if let Some(cap) = self.cap_amount {
            if salary * pct > cap {
                return SalaryDecision::new(salary, salary + cap, AdjustmentRule::CapLimited);
            }
        }
        if let Some(min) = self.min_salary_threshold {
            if salary < min {
                return SalaryDecision::new(
                    salary,
                    salary * BELOW_MIN_MULTIPLIER,
                    AdjustmentRule::BelowMinimumBoost,
                );
            }
        }
        if let Some(max) = self.max_salary_threshold {
            if salary > max {
                return SalaryDecision::new(
                    salary,
                    salary * ABOVE_MAX_MULTIPLIER,
                    AdjustmentRule::AboveMaximumDamped,
                );
            }
        }
        if let Some(required) = self.min_tenure_years {
            if tenure_years >= required {
                let boosted = (self.percent + TENURE_EXTRA_PERCENT) / Decimal::ONE_HUNDRED;
                return SalaryDecision::new(
                    salary,
                    salary * (Decimal::ONE + boosted),
                    AdjustmentRule::TenureAccelerated,
                );
            }
        }
        SalaryDecision::new(salary, salary * (Decimal::ONE + pct), AdjustmentRule::Standard)
    }
}

/// Which branch of the tiered policy produced the new salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentRule {
    CapLimited,
    BelowMinimumBoost,
    AboveMaximumDamped,
    TenureAccelerated,
    Standard,
}

impl AdjustmentRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentRule::CapLimited => "cap_limited",
            AdjustmentRule::BelowMinimumBoost => "below_minimum_boost",
            AdjustmentRule::AboveMaximumDamped => "above_maximum_damped",
            AdjustmentRule::TenureAccelerated => "tenure_accelerated",
            AdjustmentRule::Standard => "standard",
        }
    }
}

/// Outcome of evaluating the policy for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryDecision {
    pub old_salary: Decimal,
    pub new_salary: Decimal,
    pub rule: AdjustmentRule,
}

impl SalaryDecision {
    fn new(old_salary: Decimal, new_salary: Decimal, rule: AdjustmentRule) -> Self {
        Self {
            old_salary,
            new_salary: new_salary.round_dp(2),
            rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flat_ten_percent() {
        let params = AdjustmentParams::flat(dec!(10));
        let decision = params.evaluate(dec!(5000), 3);
        assert_eq!(decision.new_salary, dec!(5500.00));
        assert_eq!(decision.rule, AdjustmentRule::Standard);
    }

    #[test]
    fn test_cap_takes_precedence() {
        // 50% of 2000 is 1000, above the 500 cap: new salary is 2000 + 500
        let params = AdjustmentParams::flat(dec!(50)).with_cap(dec!(500));
        let decision = params.evaluate(dec!(2000), 0);
        assert_eq!(decision.new_salary, dec!(2500));
        assert_eq!(decision.rule, AdjustmentRule::CapLimited);
    }

    #[test]
    fn test_cap_not_triggered_below_limit() {
        // 10% of 2000 is 200, under the 500 cap: standard formula applies
        let params = AdjustmentParams::flat(dec!(10)).with_cap(dec!(500));
        let decision = params.evaluate(dec!(2000), 0);
        assert_eq!(decision.new_salary, dec!(2200.00));
        assert_eq!(decision.rule, AdjustmentRule::Standard);
    }

    #[test]
    fn test_below_minimum_boost() {
        let params = AdjustmentParams::flat(dec!(10)).with_min_threshold(dec!(3000));
        let decision = params.evaluate(dec!(2000), 0);
        assert_eq!(decision.new_salary, dec!(2300.00));
        assert_eq!(decision.rule, AdjustmentRule::BelowMinimumBoost);
    }

    #[test]
    fn test_above_maximum_damped() {
        let params = AdjustmentParams::flat(dec!(10)).with_max_threshold(dec!(8000));
        let decision = params.evaluate(dec!(10000), 0);
        assert_eq!(decision.new_salary, dec!(10200.00));
        assert_eq!(decision.rule, AdjustmentRule::AboveMaximumDamped);
    }

    #[test]
    fn test_tenure_accelerated() {
        let params = AdjustmentParams::flat(dec!(10)).with_min_tenure(5);
        let decision = params.evaluate(dec!(5000), 7);
        // 10% + 2% loyalty uplift
        assert_eq!(decision.new_salary, dec!(5600.00));
        assert_eq!(decision.rule, AdjustmentRule::TenureAccelerated);

        let decision = params.evaluate(dec!(5000), 3);
        assert_eq!(decision.rule, AdjustmentRule::Standard);
    }

    #[test]
    fn test_branch_priority_cap_over_threshold() {
        let params = AdjustmentParams::flat(dec!(50))
            .with_cap(dec!(500))
            .with_min_threshold(dec!(3000));
        // Both cap and min-threshold conditions hold; cap wins
        let decision = params.evaluate(dec!(2000), 0);
        assert_eq!(decision.rule, AdjustmentRule::CapLimited);
    }

    #[test]
    fn test_selection_mirrors_thresholds() {
        use crate::employee::Employee;
        let d = |y, m, day| chrono::NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let emp = Employee::new(1, "Ana", "ana@corp.test", d(2020, 1, 1), dec!(5000), Some(1))
            .unwrap();

        // Salary at or above the min threshold fails selection entirely
        let params = AdjustmentParams::flat(dec!(10)).with_min_threshold(dec!(5000));
        assert!(!params.selects(&emp, d(2025, 1, 1)));

        let params = AdjustmentParams::flat(dec!(10)).with_min_threshold(dec!(6000));
        assert!(params.selects(&emp, d(2025, 1, 1)));
    }
}
