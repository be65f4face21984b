//! Report generation command

use anyhow::{Context, Result};
use chrono::Datelike;
use staffledger_business::{ReportingService, ServiceContext};
use staffledger_core::PolicyGate;
use staffledger_reports::{
    CsvExporter, JsonExporter, MarkdownExporter, ReportData, ReportExporter,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::db;
use crate::{ReportFormat, ReportType};

/// Generate a report and print or write it
pub async fn generate(
    db_path: &Path,
    actor: &str,
    gate: Arc<dyn PolicyGate>,
    format: ReportFormat,
    output: Option<PathBuf>,
    report_type: ReportType,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let ledger = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&ledger, gate);
    let service = ReportingService::new(&ctx);
    let today = chrono::Local::now().date_naive();

    let content = match report_type {
        ReportType::Payroll => {
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            let report = service.monthly_payroll(actor, year, month).await?;
            export(&report, format)
        }
        ReportType::Summary => {
            let report = service.department_summary(actor).await?;
            export(&report, format)
        }
        ReportType::Directory => {
            let report = service.directory(actor, today).await?;
            export(&report, format)
        }
    };

    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write report to {:?}", path))?;
            println!("✅ Report written to {:?}", path);
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn export(report: &dyn ReportData, format: ReportFormat) -> String {
    match format {
        ReportFormat::Csv => CsvExporter::new().export(report),
        ReportFormat::Json => JsonExporter::new().export(report),
        ReportFormat::Markdown => MarkdownExporter::new().export(report),
    }
}
