//! Database initialization, seeding, and status

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use staffledger_core::{Department, Employee, Project, ProjectStatus};
use staffledger_persistence::{
    DepartmentRepo, EmployeeRepo, Ledger, PayrollRepo, ProjectRepo,
};
use std::path::Path;
use std::str::FromStr;

/// Open an existing database as a ledger
pub async fn connect(db_path: &Path) -> Result<Ledger> {
    let db_url = format!("sqlite:{}", db_path.display());
    let ledger = Ledger::connect(&db_url)
        .await
        .context("Failed to connect to database (run 'staffledger init' first?)")?;
    Ok(ledger)
}

/// Initialize the database with schema and optional seed data
pub async fn init_database(db_path: &Path, seed: bool, force: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("🗑️  Removed existing database");
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    let ledger = Ledger::init(&db_url)
        .await
        .context("Failed to initialize database")?;
    println!("📦 Schema created");

    if seed {
        seed_data(&ledger).await?;
        println!("🌱 Seed data inserted");
    }

    Ok(())
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("❌ Database not found at {:?}", db_path);
        println!("   Run 'staffledger init' to create the database");
        return Ok(());
    }

    let ledger = connect(db_path).await?;
    let mut conn = ledger.acquire().await?;

    println!("📊 Database Status");
    println!("   Path: {:?}", db_path);
    println!();
    println!("   Departments:     {}", DepartmentRepo::count(&mut conn).await?);
    println!("   Employees:       {}", EmployeeRepo::count(&mut conn).await?);
    println!("   Projects:        {}", ProjectRepo::count(&mut conn).await?);
    println!("   Payroll records: {}", PayrollRepo::count(&mut conn).await?);
    println!(
        "   Audit entries:   {}",
        staffledger_persistence::AuditRepo::count(&mut conn).await?
    );

    Ok(())
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid seed date")
}

fn money(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid seed amount")
}

/// Demo departments, employees, and projects
async fn seed_data(ledger: &Ledger) -> Result<()> {
    let mut tx = ledger.begin().await?;

    let mut dept_ids = Vec::new();
    for (name, budget, location) in [
        ("Engineering", "600000", Some("Berlin")),
        ("Sales", "250000", Some("London")),
        ("Operations", "180000", None),
    ] {
        let dept = Department::new(0, name, money(budget), location)?;
        dept_ids.push(DepartmentRepo::insert(&mut tx, &dept).await?);
    }

    for (name, email, hire, salary, dept) in [
        ("Ana Petrov", "ana@corp.test", d(2015, 3, 1), "7200", Some(0)),
        ("Ben Okafor", "ben@corp.test", d(2019, 6, 15), "6400", Some(0)),
        ("Cho Min-seo", "cho@corp.test", d(2023, 2, 1), "4800", Some(0)),
        ("Dee Haines", "dee@corp.test", d(2021, 9, 1), "5200", Some(1)),
        ("Eli Navarro", "eli@corp.test", d(2024, 11, 1), "3900", Some(1)),
        ("Fay Lindgren", "fay@corp.test", d(2022, 4, 1), "4100", Some(2)),
        ("Gus Adeyemi", "gus@corp.test", d(2025, 1, 20), "3500", None),
    ] {
        let department_id = dept.map(|i: usize| dept_ids[i]);
        let emp = Employee::new(0, name, email, hire, money(salary), department_id)?;
        EmployeeRepo::insert(&mut tx, &emp).await?;
    }

    for (name, dept, status) in [
        ("Apollo", Some(0), ProjectStatus::Active),
        ("Borealis", Some(0), ProjectStatus::Active),
        ("Caldera", Some(1), ProjectStatus::Active),
        ("Drift", Some(1), ProjectStatus::OnHold),
        ("Ember", Some(2), ProjectStatus::Completed),
    ] {
        let project = Project {
            id: 0,
            department_id: dept.map(|i: usize| dept_ids[i]),
            name: name.to_string(),
            status,
        };
        ProjectRepo::insert(&mut tx, &project).await?;
    }

    tx.commit().await?;
    Ok(())
}
