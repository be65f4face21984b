//! Monthly payroll report.
//!
//! Aggregates the payroll records of one calendar month per department.
//! The date range is half-open `[first of month, first of next month)`,
//! so records on the last day of the month belong to that month and
//! nothing leaks across the boundary.

use crate::exporters::ReportData;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use staffledger_persistence::{
    DepartmentRepo, EmployeeRepo, PayrollRepo, PersistenceError,
};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Label used for payroll rows whose employee has no department.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid pay period: year {year}, month {month}")]
    InvalidPayPeriod { year: i32, month: u32 },

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Per-department payroll aggregate for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentPayroll {
    pub department_name: String,
    pub employee_count: usize,
    pub gross_pay: Decimal,
    /// Deductions plus tax
    pub total_deductions: Decimal,
    pub net_pay: Decimal,
}

/// Monthly payroll report grouped by department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPayrollReport {
    pub year: i32,
    pub month: u32,
    pub departments: Vec<DepartmentPayroll>,
    pub generated_at: DateTime<Utc>,
}

/// Half-open date bounds of one calendar month.
pub fn pay_period_bounds(year: i32, month: u32) -> ReportResult<(NaiveDate, NaiveDate)> {
    let from = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(ReportError::InvalidPayPeriod { year, month })?;
    let to = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(ReportError::InvalidPayPeriod { year, month })?;
    Ok((from, to))
}

impl MonthlyPayrollReport {
    /// Build the report for one month from the ledger.
    ///
    /// Grouping runs in Rust: payroll rows resolve to their employee's
    /// department by id, and employees without one fall into the
    /// [`UNASSIGNED_LABEL`] group. Departments sort by name; the
    /// unassigned group, when present, comes last.
    pub async fn generate(
        conn: &mut SqliteConnection,
        year: i32,
        month: u32,
    ) -> ReportResult<Self> {
        let (from, to) = pay_period_bounds(year, month)?;

        let payroll_rows = PayrollRepo::list_in_range(conn, from, to).await?;
        let employee_rows = EmployeeRepo::get_all(conn).await?;
        let department_rows = DepartmentRepo::get_all(conn).await?;

        let department_names: BTreeMap<i64, String> = department_rows
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect();
        let employee_departments: BTreeMap<i64, Option<i64>> = employee_rows
            .into_iter()
            .map(|e| (e.id, e.department_id))
            .collect();

        struct Group {
            employees: HashSet<i64>,
            gross: Decimal,
            deductions: Decimal,
            net: Decimal,
        }

        // BTreeMap keyed by (is_unassigned, name) keeps departments in
        // name order with the unassigned group at the end.
        let mut groups: BTreeMap<(bool, String), Group> = BTreeMap::new();
        for row in payroll_rows {
            let record = staffledger_core::PayrollRecord::try_from(row)?;
            let key = employee_departments
                .get(&record.employee_id)
                .copied()
                .flatten()
                .and_then(|dept| department_names.get(&dept))
                .map(|name| (false, name.clone()))
                .unwrap_or((true, UNASSIGNED_LABEL.to_string()));

            let group = groups.entry(key).or_insert_with(|| Group {
                employees: HashSet::new(),
                gross: Decimal::ZERO,
                deductions: Decimal::ZERO,
                net: Decimal::ZERO,
            });
            group.employees.insert(record.employee_id);
            group.gross += record.gross_pay();
            group.deductions += record.deductions + record.tax;
            group.net += record.net_pay();
        }

        let departments = groups
            .into_iter()
            .map(|((_, name), group)| DepartmentPayroll {
                department_name: name,
                employee_count: group.employees.len(),
                gross_pay: group.gross,
                total_deductions: group.deductions,
                net_pay: group.net,
            })
            .collect();

        Ok(Self {
            year,
            month,
            departments,
            generated_at: Utc::now(),
        })
    }

    pub fn total_net(&self) -> Decimal {
        self.departments.iter().map(|d| d.net_pay).sum()
    }

    pub fn total_gross(&self) -> Decimal {
        self.departments.iter().map(|d| d.gross_pay).sum()
    }
}

impl ReportData for MonthlyPayrollReport {
    fn title(&self) -> String {
        format!("Monthly Payroll Report {}-{:02}", self.year, self.month)
    }

    fn headers(&self) -> Vec<String> {
        vec![
            "Department".to_string(),
            "Employees".to_string(),
            "Gross Pay".to_string(),
            "Deductions".to_string(),
            "Net Pay".to_string(),
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.departments
            .iter()
            .map(|d| {
                vec![
                    d.department_name.clone(),
                    d.employee_count.to_string(),
                    d.gross_pay.to_string(),
                    d.total_deductions.to_string(),
                    d.net_pay.to_string(),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Departments".to_string(), self.departments.len().to_string()),
            ("Total Gross".to_string(), self.total_gross().to_string()),
            ("Total Net".to_string(), self.total_net().to_string()),
            ("Generated At".to_string(), self.generated_at.to_rfc3339()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use staffledger_core::{Department, Employee, PayrollRecord};
    use staffledger_persistence::Ledger;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn fixture() -> Ledger {
        let ledger = Ledger::in_memory().await.unwrap();
        let mut conn = ledger.acquire().await.unwrap();

        let eng = Department::new(0, "Engineering", dec!(500000), None).unwrap();
        let eng_id = DepartmentRepo::insert(&mut conn, &eng).await.unwrap();
        let sales = Department::new(0, "Sales", dec!(200000), None).unwrap();
        let sales_id = DepartmentRepo::insert(&mut conn, &sales).await.unwrap();

        for (name, email, dept) in [
            ("Ana", "ana@corp.test", Some(eng_id)),
            ("Ben", "ben@corp.test", Some(sales_id)),
            ("Cho", "cho@corp.test", None),
        ] {
            let emp = Employee::new(0, name, email, d(2020, 1, 1), dec!(5000), dept).unwrap();
            EmployeeRepo::insert(&mut conn, &emp).await.unwrap();
        }

        // January records for all three; one February record for Ana
        for (employee_id, pay_date, bonus, deductions, tax) in [
            (1, d(2026, 1, 31), dec!(500), dec!(100), dec!(800)),
            (2, d(2026, 1, 31), dec!(0), dec!(50), dec!(750)),
            (3, d(2026, 1, 31), dec!(0), dec!(0), dec!(700)),
            (1, d(2026, 2, 28), dec!(0), dec!(0), dec!(800)),
        ] {
            let rec =
                PayrollRecord::new(0, employee_id, pay_date, dec!(5000), bonus, deductions, tax)
                    .unwrap();
            PayrollRepo::insert(&mut conn, &rec).await.unwrap();
        }

        ledger
    }

    #[tokio::test]
    async fn test_groups_by_department_with_unassigned_last() {
        let ledger = fixture().await;
        let mut conn = ledger.acquire().await.unwrap();

        let report = MonthlyPayrollReport::generate(&mut conn, 2026, 1)
            .await
            .unwrap();

        let names: Vec<&str> = report
            .departments
            .iter()
            .map(|d| d.department_name.as_str())
            .collect();
        assert_eq!(names, vec!["Engineering", "Sales", "Unassigned"]);

        let eng = &report.departments[0];
        assert_eq!(eng.employee_count, 1);
        assert_eq!(eng.gross_pay, dec!(5500));
        assert_eq!(eng.total_deductions, dec!(900));
        assert_eq!(eng.net_pay, dec!(4600));
    }

    #[tokio::test]
    async fn test_months_do_not_leak_into_each_other() {
        let ledger = fixture().await;
        let mut conn = ledger.acquire().await.unwrap();

        let january = MonthlyPayrollReport::generate(&mut conn, 2026, 1)
            .await
            .unwrap();
        let february = MonthlyPayrollReport::generate(&mut conn, 2026, 2)
            .await
            .unwrap();

        assert_eq!(january.total_gross(), dec!(15500));
        assert_eq!(february.total_gross(), dec!(5000));
        assert_eq!(february.departments.len(), 1);
        assert_eq!(february.departments[0].department_name, "Engineering");
    }

    #[tokio::test]
    async fn test_empty_month_yields_empty_report() {
        let ledger = fixture().await;
        let mut conn = ledger.acquire().await.unwrap();

        let report = MonthlyPayrollReport::generate(&mut conn, 2026, 6)
            .await
            .unwrap();
        assert!(report.departments.is_empty());
        assert_eq!(report.total_net(), dec!(0));
    }

    #[tokio::test]
    async fn test_invalid_month_rejected() {
        let ledger = fixture().await;
        let mut conn = ledger.acquire().await.unwrap();

        let err = MonthlyPayrollReport::generate(&mut conn, 2026, 13)
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidPayPeriod { .. }));
    }

    #[test]
    fn test_december_bounds_roll_into_next_year() {
        let (from, to) = pay_period_bounds(2026, 12).unwrap();
        assert_eq!(from, d(2026, 12, 1));
        assert_eq!(to, d(2027, 1, 1));
    }
}
