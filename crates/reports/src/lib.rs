//! # Staffledger Reports
//!
//! Report generation - monthly payroll, department summary, employee
//! directory, with CSV/JSON/Markdown export.
//!
//! ## Exporters
//!
//! - [`CsvExporter`] - CSV format with proper escaping
//! - [`JsonExporter`] - JSON format (pretty or compact)
//! - [`MarkdownExporter`] - Markdown tables for documentation
//!
//! ## Reports
//!
//! - [`MonthlyPayrollReport`] - per-department payroll for one month
//! - [`DepartmentSummaryReport`] - headcount and budget utilization
//! - [`EmployeeDirectoryReport`] - active employees with tenure
//!
//! ## Example
//!
//! ```rust,ignore
//! use staffledger_reports::{CsvExporter, MonthlyPayrollReport, ReportExporter};
//!
//! let report = MonthlyPayrollReport::generate(&mut conn, 2026, 1).await?;
//! let csv = CsvExporter::new().export(&report);
//! ```

pub mod exporters;
pub mod payroll_report;
pub mod summary;

pub use exporters::{CsvExporter, JsonExporter, MarkdownExporter, ReportData, ReportExporter};
pub use payroll_report::{
    pay_period_bounds, DepartmentPayroll, MonthlyPayrollReport, ReportError, ReportResult,
};
pub use summary::{
    DepartmentSummaryReport, DepartmentSummaryRow, DirectoryEntry, EmployeeDirectoryReport,
};
