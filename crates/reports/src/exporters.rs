//! Report exporters - CSV, JSON, Markdown.
//!
//! Every report type implements [`ReportData`] (title, headers, rows,
//! summary) and any exporter can render it.

/// Trait for exporting reports to different formats
pub trait ReportExporter {
    /// Export to the target format
    fn export(&self, report: &dyn ReportData) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;

    /// Get the MIME type for this format
    fn mime_type(&self) -> &'static str;
}

/// Trait for data that can be exported
pub trait ReportData {
    /// Get the report title
    fn title(&self) -> String;

    /// Get column headers
    fn headers(&self) -> Vec<String>;

    /// Get data rows
    fn rows(&self) -> Vec<Vec<String>>;

    /// Get summary statistics as key-value pairs
    fn summary(&self) -> Vec<(String, String)>;
}

// ============================================================================
// CSV Exporter
// ============================================================================

/// CSV format exporter
pub struct CsvExporter {
    delimiter: char,
    include_header: bool,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }

    fn escape_csv_field(&self, field: &str) -> String {
        if field.contains(self.delimiter) || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

impl ReportExporter for CsvExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = String::new();

        if self.include_header {
            let headers: Vec<String> = report
                .headers()
                .iter()
                .map(|h| self.escape_csv_field(h))
                .collect();
            output.push_str(&headers.join(&self.delimiter.to_string()));
            output.push('\n');
        }

        for row in report.rows() {
            let escaped: Vec<String> = row
                .iter()
                .map(|field| self.escape_csv_field(field))
                .collect();
            output.push_str(&escaped.join(&self.delimiter.to_string()));
            output.push('\n');
        }

        output
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn mime_type(&self) -> &'static str {
        "text/csv"
    }
}

// ============================================================================
// JSON Exporter
// ============================================================================

/// JSON format exporter
pub struct JsonExporter {
    pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl ReportExporter for JsonExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let headers = report.headers();

        let json_rows: Vec<serde_json::Value> = report
            .rows()
            .iter()
            .map(|row| {
                let mut obj = serde_json::Map::new();
                for (i, header) in headers.iter().enumerate() {
                    let value = row.get(i).cloned().unwrap_or_default();
                    obj.insert(header.clone(), serde_json::Value::String(value));
                }
                serde_json::Value::Object(obj)
            })
            .collect();

        let summary_obj: serde_json::Map<String, serde_json::Value> = report
            .summary()
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();

        let output = serde_json::json!({
            "title": report.title(),
            "summary": summary_obj,
            "data": json_rows,
        });

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_default()
        } else {
            serde_json::to_string(&output).unwrap_or_default()
        }
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }
}

// ============================================================================
// Markdown Exporter
// ============================================================================

/// Markdown format exporter
pub struct MarkdownExporter {
    include_summary: bool,
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self {
            include_summary: true,
        }
    }
}

impl MarkdownExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_summary(mut self) -> Self {
        self.include_summary = false;
        self
    }
}

impl ReportExporter for MarkdownExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", report.title()));

        if self.include_summary {
            output.push_str("## Summary\n\n");
            for (key, value) in report.summary() {
                output.push_str(&format!("- **{}**: {}\n", key, value));
            }
            output.push('\n');
        }

        output.push_str("## Data\n\n");

        let headers = report.headers();
        if !headers.is_empty() {
            output.push_str("| ");
            output.push_str(&headers.join(" | "));
            output.push_str(" |\n");

            output.push_str("| ");
            output.push_str(&headers.iter().map(|_| "---").collect::<Vec<_>>().join(" | "));
            output.push_str(" |\n");

            for row in report.rows() {
                output.push_str("| ");
                output.push_str(&row.join(" | "));
                output.push_str(" |\n");
            }
        }

        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll_report::{DepartmentPayroll, MonthlyPayrollReport};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample_report() -> MonthlyPayrollReport {
        MonthlyPayrollReport {
            year: 2026,
            month: 1,
            departments: vec![
                DepartmentPayroll {
                    department_name: "Engineering".to_string(),
                    employee_count: 2,
                    gross_pay: dec!(11000),
                    total_deductions: dec!(1800),
                    net_pay: dec!(9200),
                },
                DepartmentPayroll {
                    department_name: "Sales".to_string(),
                    employee_count: 1,
                    gross_pay: dec!(5000),
                    total_deductions: dec!(800),
                    net_pay: dec!(4200),
                },
            ],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_csv_exporter() {
        let report = sample_report();
        let exporter = CsvExporter::new();
        let output = exporter.export(&report);

        assert!(output.contains("Department,Employees,Gross Pay,Deductions,Net Pay"));
        assert!(output.contains("Engineering,2,11000,1800,9200"));
        assert!(output.contains("Sales,1,5000,800,4200"));
        assert_eq!(exporter.extension(), "csv");
    }

    #[test]
    fn test_csv_escapes_special_chars() {
        let mut report = sample_report();
        report.departments[0].department_name = "R&D, \"Labs\"".to_string();

        let exporter = CsvExporter::new();
        let output = exporter.export(&report);
        assert!(output.contains("\"R&D, \"\"Labs\"\"\""));
    }

    #[test]
    fn test_csv_custom_delimiter_without_header() {
        let report = sample_report();
        let exporter = CsvExporter::new().with_delimiter(';').without_header();
        let output = exporter.export(&report);

        assert!(!output.contains("Department;Employees"));
        assert!(output.contains("Engineering;2;11000;1800;9200"));
    }

    #[test]
    fn test_json_exporter() {
        let report = sample_report();
        let exporter = JsonExporter::new();
        let output = exporter.export(&report);

        assert!(output.contains("\"title\": \"Monthly Payroll Report 2026-01\""));
        assert!(output.contains("\"Engineering\""));
        assert!(output.contains("\"Total Net\""));
        assert_eq!(exporter.extension(), "json");

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["data"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_compact_has_no_indentation() {
        let report = sample_report();
        let exporter = JsonExporter::new().compact();
        let output = exporter.export(&report);
        assert!(!output.contains("  "));
    }

    #[test]
    fn test_markdown_exporter() {
        let report = sample_report();
        let exporter = MarkdownExporter::new();
        let output = exporter.export(&report);

        assert!(output.contains("# Monthly Payroll Report 2026-01"));
        assert!(output.contains("## Summary"));
        assert!(output.contains("## Data"));
        assert!(output.contains("| Department | Employees | Gross Pay | Deductions | Net Pay |"));
        assert!(output.contains("| Engineering | 2 |"));
        assert_eq!(exporter.extension(), "md");
    }

    #[test]
    fn test_markdown_without_summary() {
        let report = sample_report();
        let exporter = MarkdownExporter::new().without_summary();
        let output = exporter.export(&report);
        assert!(!output.contains("## Summary"));
        assert!(output.contains("## Data"));
    }
}
