//! Payroll records - append-only ledger of disbursements.

use crate::error::{CoreError, CoreResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One salary disbursement. Immutable once created.
///
/// Net pay is derived, never stored. Tax is an externally supplied
/// input, not computed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: i64,
    pub employee_id: i64,
    pub pay_date: NaiveDate,
    pub base_salary: Decimal,
    pub bonus: Decimal,
    pub deductions: Decimal,
    pub tax: Decimal,
}

impl PayrollRecord {
    pub fn new(
        id: i64,
        employee_id: i64,
        pay_date: NaiveDate,
        base_salary: Decimal,
        bonus: Decimal,
        deductions: Decimal,
        tax: Decimal,
    ) -> CoreResult<Self> {
        if bonus < Decimal::ZERO {
            return Err(CoreError::NegativeAmount {
                field: "bonus",
                value: bonus,
            });
        }
        if deductions < Decimal::ZERO {
            return Err(CoreError::NegativeAmount {
                field: "deductions",
                value: deductions,
            });
        }
        if tax < Decimal::ZERO {
            return Err(CoreError::NegativeAmount {
                field: "tax",
                value: tax,
            });
        }
        Ok(Self {
            id,
            employee_id,
            pay_date,
            base_salary,
            bonus,
            deductions,
            tax,
        })
    }

    /// base + bonus - deductions - tax
    pub fn net_pay(&self) -> Decimal {
        self.base_salary + self.bonus - self.deductions - self.tax
    }

    /// base + bonus
    pub fn gross_pay(&self) -> Decimal {
        self.base_salary + self.bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_net_pay_is_derived() {
        let rec = PayrollRecord::new(
            1,
            10,
            d(2026, 1, 31),
            dec!(5000),
            dec!(500),
            dec!(200),
            dec!(800),
        )
        .unwrap();
        assert_eq!(rec.net_pay(), dec!(4500));
        assert_eq!(rec.gross_pay(), dec!(5500));
    }

    #[test]
    fn test_rejects_negative_components() {
        let err = PayrollRecord::new(
            1,
            10,
            d(2026, 1, 31),
            dec!(5000),
            dec!(-1),
            dec!(0),
            dec!(0),
        );
        assert!(err.is_err());
    }
}
