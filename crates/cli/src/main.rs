//! Staffledger CLI - HR and payroll operations from command line
//!
//! Usage:
//! ```bash
//! staffledger init --seed
//! staffledger employee add --name "Ana Petrov" --email ana@corp.test \
//!     --hire-date 2020-03-01 --salary 5000 --department 1
//! staffledger adjust-salaries --percent 10 --department 1
//! staffledger bonus 7 --rating 5 --award
//! staffledger budget-check 1 --percent 5
//! staffledger retention
//! staffledger report --report-type payroll --year 2026 --month 1 --format csv
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use staffledger_core::{AllowAll, PolicyGate, Role, RoleTable};
use std::path::PathBuf;
use std::sync::Arc;

mod commands;
mod db;

use commands::{adjust, analysis, employee, report};

/// Staffledger - an HR/payroll rules engine over SQLite
#[derive(Parser)]
#[command(name = "staffledger")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/staffledger.db", global = true)]
    pub db: PathBuf,

    /// Acting user recorded in the audit log
    #[arg(long, default_value = "admin", global = true)]
    pub actor: String,

    /// Restrict the actor to one role (omit to allow everything)
    #[arg(long, global = true)]
    pub role: Option<RoleArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init {
        /// Insert demo departments, employees, and projects
        #[arg(long)]
        seed: bool,
        /// Force re-initialization (drops existing data)
        #[arg(long)]
        force: bool,
    },

    /// Show database status
    Status,

    /// Employee directory management
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Apply a flat percentage salary adjustment
    AdjustSalaries {
        /// Percentage change (may be negative)
        #[arg(long)]
        percent: Decimal,
        /// Restrict to one department
        #[arg(long)]
        department: Option<i64>,
        /// Evaluation date for tenure (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Apply the tiered adjustment with cap and thresholds
    EnhancedAdjust {
        /// Base percentage change
        #[arg(long)]
        percent: Decimal,
        /// Restrict to one department
        #[arg(long)]
        department: Option<i64>,
        /// Absolute cap on the raise amount
        #[arg(long)]
        cap: Option<Decimal>,
        /// Only employees below this salary
        #[arg(long)]
        min_salary: Option<Decimal>,
        /// Only employees above this salary
        #[arg(long)]
        max_salary: Option<Decimal>,
        /// Only employees with at least this many years of tenure
        #[arg(long)]
        min_tenure: Option<i32>,
        /// Evaluation date for tenure (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Calculate (and optionally award) a performance bonus
    Bonus {
        /// Employee ID
        employee_id: i64,
        /// Performance rating 1-5
        #[arg(long)]
        rating: u8,
        /// Base bonus percentage (default 5)
        #[arg(long)]
        base_percent: Option<Decimal>,
        /// Persist the bonus as a payroll record
        #[arg(long)]
        award: bool,
        /// Pay date for an awarded bonus (defaults to today)
        #[arg(long)]
        pay_date: Option<NaiveDate>,
    },

    /// Check a proposed salary increase against a department budget
    BudgetCheck {
        /// Department ID
        department_id: i64,
        /// Proposed percentage increase
        #[arg(long, default_value = "0")]
        percent: Decimal,
    },

    /// Recommend a headcount for a department
    Headcount {
        /// Department ID
        department_id: i64,
    },

    /// Assess retention risk across all active employees
    Retention {
        /// Evaluation date for tenure (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Generate reports
    Report {
        /// Report format
        #[arg(long, default_value = "markdown")]
        format: ReportFormat,
        /// Output file path (prints to stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Report type
        #[arg(long, default_value = "payroll")]
        report_type: ReportType,
        /// Pay period year (payroll report)
        #[arg(long)]
        year: Option<i32>,
        /// Pay period month (payroll report)
        #[arg(long)]
        month: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Hire a new employee
    Add {
        #[arg(long, short)]
        name: String,
        #[arg(long, short)]
        email: String,
        #[arg(long)]
        hire_date: NaiveDate,
        #[arg(long)]
        salary: Decimal,
        /// Department ID (omit for unassigned)
        #[arg(long)]
        department: Option<i64>,
    },
    /// List active employees
    List {
        /// Filter by department ID
        #[arg(long)]
        department: Option<i64>,
    },
    /// Deactivate an employee (logical delete)
    Deactivate {
        /// Employee ID
        employee_id: i64,
    },
    /// Move an employee to another department
    Reassign {
        /// Employee ID
        employee_id: i64,
        /// Target department ID (omit to unassign)
        #[arg(long)]
        department: Option<i64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoleArg {
    HrAdministrator,
    PayrollManager,
    DepartmentLead,
}

impl RoleArg {
    pub fn to_core_role(self) -> Role {
        match self {
            RoleArg::HrAdministrator => Role::HrAdministrator,
            RoleArg::PayrollManager => Role::PayrollManager,
            RoleArg::DepartmentLead => Role::DepartmentLead,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
    Markdown,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportType {
    Payroll,
    Summary,
    Directory,
}

/// Build the capability gate from the CLI flags
fn build_gate(actor: &str, role: Option<RoleArg>) -> Arc<dyn PolicyGate> {
    match role {
        Some(role) => Arc::new(RoleTable::new().assign(actor, role.to_core_role())),
        None => Arc::new(AllowAll),
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Some(parent) = cli.db.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let gate = build_gate(&cli.actor, cli.role);

    match cli.command {
        Commands::Init { seed, force } => {
            db::init_database(&cli.db, seed, force).await?;
            println!("✅ Database initialized at {:?}", cli.db);
        }

        Commands::Status => {
            db::show_status(&cli.db).await?;
        }

        Commands::Employee { action } => {
            employee::handle(&cli.db, &cli.actor, gate, action).await?;
        }

        Commands::AdjustSalaries {
            percent,
            department,
            as_of,
        } => {
            adjust::flat(
                &cli.db,
                &cli.actor,
                gate,
                percent,
                department,
                as_of.unwrap_or_else(today),
            )
            .await?;
        }

        Commands::EnhancedAdjust {
            percent,
            department,
            cap,
            min_salary,
            max_salary,
            min_tenure,
            as_of,
        } => {
            adjust::enhanced(
                &cli.db,
                &cli.actor,
                gate,
                adjust::EnhancedArgs {
                    percent,
                    department,
                    cap,
                    min_salary,
                    max_salary,
                    min_tenure,
                },
                as_of.unwrap_or_else(today),
            )
            .await?;
        }

        Commands::Bonus {
            employee_id,
            rating,
            base_percent,
            award,
            pay_date,
        } => {
            adjust::bonus(
                &cli.db,
                &cli.actor,
                gate,
                employee_id,
                rating,
                base_percent,
                award,
                pay_date.unwrap_or_else(today),
            )
            .await?;
        }

        Commands::BudgetCheck {
            department_id,
            percent,
        } => {
            analysis::budget_check(&cli.db, &cli.actor, gate, department_id, percent).await?;
        }

        Commands::Headcount { department_id } => {
            analysis::headcount(&cli.db, &cli.actor, gate, department_id).await?;
        }

        Commands::Retention { as_of } => {
            analysis::retention(&cli.db, &cli.actor, gate, as_of.unwrap_or_else(today)).await?;
        }

        Commands::Report {
            format,
            output,
            report_type,
            year,
            month,
        } => {
            report::generate(
                &cli.db,
                &cli.actor,
                gate,
                format,
                output,
                report_type,
                year,
                month,
            )
            .await?;
        }
    }

    Ok(())
}
