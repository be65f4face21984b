//! # Employee Module
//!
//! Employee entity and selection filters.
//!
//! Invariants:
//! - `salary > 0` at all times
//! - inactive employees stay in the ledger for audit history but are
//!   excluded from every aggregate rule computation

use crate::error::{CoreError, CoreResult};
use crate::tenure;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employee in the ledger.
///
/// The salary field is only ever mutated through the adjustment
/// orchestrator so that every change passes through audit capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// Unique across the ledger
    pub email: String,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    /// `None` means "unassigned"
    pub department_id: Option<i64>,
    pub is_active: bool,
}

impl Employee {
    /// Create a new employee, validating the salary invariant.
    pub fn new(
        id: i64,
        name: &str,
        email: &str,
        hire_date: NaiveDate,
        salary: Decimal,
        department_id: Option<i64>,
    ) -> CoreResult<Self> {
        if salary <= Decimal::ZERO {
            return Err(CoreError::NonPositiveSalary(salary));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            hire_date,
            salary,
            department_id,
            is_active: true,
        })
    }

    /// Whole years of service as of the given date
    pub fn tenure_years(&self, as_of: NaiveDate) -> i32 {
        tenure::tenure_years(self.hire_date, as_of)
    }

    /// Whole months of service as of the given date
    pub fn tenure_months(&self, as_of: NaiveDate) -> i32 {
        tenure::tenure_months(self.hire_date, as_of)
    }
}

/// Conjunctive selection filter over employees.
///
/// A `None` field means "no constraint". Inactive employees never match.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub department_id: Option<i64>,
    pub min_salary: Option<Decimal>,
    pub max_salary: Option<Decimal>,
    pub min_tenure_years: Option<i32>,
}

impl EmployeeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department(mut self, department_id: i64) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub fn with_salary_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_salary = min;
        self.max_salary = max;
        self
    }

    pub fn with_min_tenure(mut self, years: i32) -> Self {
        self.min_tenure_years = Some(years);
        self
    }

    /// Evaluate the filter against one employee
    pub fn matches(&self, employee: &Employee, as_of: NaiveDate) -> bool {
        if !employee.is_active {
            return false;
        }
        if let Some(dept) = self.department_id {
            if employee.department_id != Some(dept) {
                return false;
            }
        }
        if let Some(min) = self.min_salary {
            if employee.salary < min {
                return false;
            }
        }
        if let Some(max) = self.max_salary {
            if employee.salary > max {
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
}
