//! Department summary and employee directory reports.

use crate::exporters::ReportData;
use crate::payroll_report::{ReportResult, UNASSIGNED_LABEL};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use staffledger_core::{Department, Employee};
use staffledger_persistence::{DepartmentRepo, EmployeeRepo};

/// One department's staffing and budget figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummaryRow {
    pub department_name: String,
    pub headcount: usize,
    pub total_salary: Decimal,
    pub average_salary: Decimal,
    pub budget: Decimal,
    /// total salary / budget * 100, zero when the budget is zero
    pub utilization_percent: Decimal,
}

/// Snapshot of every department: headcount, salary totals, budget use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentSummaryReport {
    pub rows: Vec<DepartmentSummaryRow>,
    pub generated_at: DateTime<Utc>,
}

impl DepartmentSummaryReport {
    /// Build the summary from the ledger. Only active employees count.
    pub async fn generate(conn: &mut SqliteConnection) -> ReportResult<Self> {
        let departments = DepartmentRepo::get_all(conn).await?;

        let mut rows = Vec::with_capacity(departments.len());
        for dept_row in departments {
            let department = Department::try_from(dept_row)?;
            let salaries = EmployeeRepo::active_salaries(conn, Some(department.id)).await?;

            let headcount = salaries.len();
            let total_salary: Decimal = salaries.iter().sum();
            let average_salary = if headcount > 0 {
                (total_salary / Decimal::from(headcount as i64)).round_dp(2)
            } else {
                Decimal::ZERO
            };
            let utilization_percent = if department.budget > Decimal::ZERO {
                (total_salary / department.budget * Decimal::ONE_HUNDRED).round_dp(2)
            } else {
                Decimal::ZERO
            };

            rows.push(DepartmentSummaryRow {
                department_name: department.name,
                headcount,
                total_salary,
                average_salary,
                budget: department.budget,
                utilization_percent,
            });
        }

        Ok(Self {
            rows,
            generated_at: Utc::now(),
        })
    }
}

impl ReportData for DepartmentSummaryReport {
    fn title(&self) -> String {
        "Department Summary".to_string()
    }

    fn headers(&self) -> Vec<String> {
        vec![
            "Department".to_string(),
            "Headcount".to_string(),
            "Total Salary".to_string(),
            "Average Salary".to_string(),
            "Budget".to_string(),
            "Utilization %".to_string(),
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                vec![
                    r.department_name.clone(),
                    r.headcount.to_string(),
                    r.total_salary.to_string(),
                    r.average_salary.to_string(),
                    r.budget.to_string(),
                    r.utilization_percent.to_string(),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        let total_headcount: usize = self.rows.iter().map(|r| r.headcount).sum();
        vec![
            ("Departments".to_string(), self.rows.len().to_string()),
            ("Total Headcount".to_string(), total_headcount.to_string()),
            ("Generated At".to_string(), self.generated_at.to_rfc3339()),
        ]
    }
}

/// Directory of active employees as of a given date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDirectoryReport {
    pub as_of: NaiveDate,
    pub entries: Vec<DirectoryEntry>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub employee_id: i64,
    pub name: String,
    pub email: String,
    pub department_name: String,
    pub hire_date: NaiveDate,
    pub tenure_years: i32,
    pub salary: Decimal,
}

impl EmployeeDirectoryReport {
    pub async fn generate(conn: &mut SqliteConnection, as_of: NaiveDate) -> ReportResult<Self> {
        let departments = DepartmentRepo::get_all(conn).await?;
        let names: std::collections::HashMap<i64, String> =
            departments.into_iter().map(|d| (d.id, d.name)).collect();

        let rows = EmployeeRepo::list_active(conn, None).await?;
        let entries = rows
            .into_iter()
            .map(|row| {
                let employee = Employee::try_from(row)?;
                let department_name = employee
                    .department_id
                    .and_then(|id| names.get(&id).cloned())
                    .unwrap_or_else(|| UNASSIGNED_LABEL.to_string());
                Ok(DirectoryEntry {
                    employee_id: employee.id,
                    name: employee.name.clone(),
                    email: employee.email.clone(),
                    department_name,
                    hire_date: employee.hire_date,
                    tenure_years: employee.tenure_years(as_of),
                    salary: employee.salary,
                })
            })
            .collect::<ReportResult<Vec<_>>>()?;

        Ok(Self {
            as_of,
            entries,
            generated_at: Utc::now(),
        })
    }
}

impl ReportData for EmployeeDirectoryReport {
    fn title(&self) -> String {
        format!("Employee Directory as of {}", self.as_of)
    }

    fn headers(&self) -> Vec<String> {
        vec![
            "ID".to_string(),
            "Name".to_string(),
            "Email".to_string(),
            "Department".to_string(),
            "Hire Date".to_string(),
            "Tenure (years)".to_string(),
            "Salary".to_string(),
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|e| {
                vec![
                    e.employee_id.to_string(),
                    e.name.clone(),
                    e.email.clone(),
                    e.department_name.clone(),
                    e.hire_date.to_string(),
                    e.tenure_years.to_string(),
                    e.salary.to_string(),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Active Employees".to_string(), self.entries.len().to_string()),
            ("Generated At".to_string(), self.generated_at.to_rfc3339()),
        ]
    }
}
