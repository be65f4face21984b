//! # Performance Bonus Rules
//!
//! Three-step bonus calculation:
//! 1. tiered base amount from the performance rating
//! 2. tenure multiplier
//! 3. hard cap at 20% of salary

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default base bonus percentage when the caller supplies none.
pub const DEFAULT_BASE_BONUS_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

const RATING_5_UPLIFT: Decimal = Decimal::from_parts(5, 0, 0, false, 0); // +5
const RATING_4_UPLIFT: Decimal = Decimal::from_parts(25, 0, 0, false, 1); // +2.5
const RATING_2_PENALTY: Decimal = Decimal::TWO; // -2
const BONUS_CAP_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2); // 0.20

const TENURE_10Y_MULTIPLIER: Decimal = Decimal::from_parts(12, 0, 0, false, 1); // 1.2
const TENURE_5Y_MULTIPLIER: Decimal = Decimal::from_parts(11, 0, 0, false, 1); // 1.1
const TENURE_2Y_MULTIPLIER: Decimal = Decimal::from_parts(105, 0, 0, false, 2); // 1.05

/// Bonus outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusStatus {
    NoBonus,
    MaximumBonusReached,
    Standard,
}

impl BonusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BonusStatus::NoBonus => "No bonus",
            BonusStatus::MaximumBonusReached => "Maximum Bonus Reached",
            BonusStatus::Standard => "Standard",
        }
    }
}

impl fmt::Display for BonusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one bonus calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusResult {
    pub amount: Decimal,
    pub status: BonusStatus,
    pub rating: u8,
    pub tenure_multiplier: Decimal,
}

/// Compute the performance bonus for one employee.
///
/// Rating tiers: 5 -> (base+5)%, 4 -> (base+2.5)%, 3 -> base%,
/// 2 -> (base-2)%, anything else -> no bonus. A tier rate that computes
/// negative clamps to zero so `bonus >= 0` holds for any base percent.
pub fn performance_bonus(
    salary: Decimal,
    rating: u8,
    base_percent: Decimal,
    tenure_years: i32,
) -> BonusResult {
    let rate = match rating {
        5 => base_percent + RATING_5_UPLIFT,
        4 => base_percent + RATING_4_UPLIFT,
        3 => base_percent,
        2 => (base_percent - RATING_2_PENALTY).max(Decimal::ZERO),
        _ => Decimal::ZERO,
    };

    let multiplier = tenure_multiplier(tenure_years);
    let raw = salary * rate / Decimal::ONE_HUNDRED * multiplier;
    let cap = salary * BONUS_CAP_RATE;

    let (amount, status) = if raw <= Decimal::ZERO {
        (Decimal::ZERO, BonusStatus::NoBonus)
    } else if raw >= cap {
        (cap.round_dp(2), BonusStatus::MaximumBonusReached)
    } else {
        (raw.round_dp(2), BonusStatus::Standard)
    };

    BonusResult {
        amount,
        status,
        rating,
        tenure_multiplier: multiplier,
    }
}

fn tenure_multiplier(tenure_years: i32) -> Decimal {
    if tenure_years >= 10 {
        TENURE_10Y_MULTIPLIER
    } else if tenure_years >= 5 {
        TENURE_5Y_MULTIPLIER
    } else if tenure_years >= 2 {
        TENURE_2Y_MULTIPLIER
    } else {
        Decimal::ONE
    }
}
