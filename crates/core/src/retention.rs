//! # Retention Risk Rules
//!
//! Department-relative salary percentile plus tenure transition windows.
//! Recomputed on demand from a ledger snapshot, never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Retention risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    High,
    Medium,
    Potential,
    Low,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::High => "High Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::Potential => "Potential Risk",
            RiskTier::Low => "Low Risk",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fractional rank (0..1) of `salary` among its active department peers.
///
/// `peer_salaries` must include the employee's own salary. Rank follows
/// `PERCENT_RANK`: (values strictly below) / (n - 1), 0.0 for a
/// partition of one.
pub fn percentile_rank(peer_salaries: &[Decimal], salary: Decimal) -> f64 {
    let n = peer_salaries.len();
    if n <= 1 {
        return 0.0;
    }
    let below = peer_salaries.iter().filter(|&&s| s < salary).count();
    below as f64 / (n - 1) as f64
}

/// Tenure transition window: months 12..=24 or 36..=48 since hire.
pub fn in_transition_window(tenure_months: i32) -> bool {
    (12..=24).contains(&tenure_months) || (36..=48).contains(&tenure_months)
}

/// Classify one employee's retention risk.
pub fn risk_tier(salary_percentile: f64, tenure_months: i32) -> RiskTier {
    let in_window = in_transition_window(tenure_months);
    if salary_percentile < 0.3 && in_window {
        RiskTier::High
    } else if salary_percentile < 0.5 && in_window {
        RiskTier::Medium
    } else if salary_percentile < 0.3 {
        RiskTier::Potential
    } else {
        RiskTier::Low
    }
}

/// Per-employee retention assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionAssessment {
    pub employee_id: i64,
    pub employee_name: String,
    pub department_id: Option<i64>,
    pub salary_percentile: f64,
    pub tenure_months: i32,
    pub in_transition_window: bool,
    pub tier: RiskTier,
}
