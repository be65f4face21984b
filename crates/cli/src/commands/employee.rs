//! Employee directory commands

use anyhow::Result;
use staffledger_business::{DirectoryService, ServiceContext};
use staffledger_core::PolicyGate;
use std::path::Path;
use std::sync::Arc;

use crate::db;
use crate::EmployeeAction;

/// Handle employee subcommands
pub async fn handle(
    db_path: &Path,
    actor: &str,
    gate: Arc<dyn PolicyGate>,
    action: EmployeeAction,
) -> Result<()> {
    let ledger = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&ledger, gate);
    let service = DirectoryService::new(&ctx);

    match action {
        EmployeeAction::Add {
            name,
            email,
            hire_date,
            salary,
            department,
        } => {
            let employee = service
                .hire(actor, &name, &email, hire_date, salary, department)
                .await?;
            println!("✅ Hired {} (id {})", employee.name, employee.id);
        }

        EmployeeAction::List { department } => {
            let employees = service.list_active(actor, department).await?;
            if employees.is_empty() {
                println!("No active employees found");
                return Ok(());
            }
            println!(
                "{:<5} {:<20} {:<25} {:<12} {:>10} {:>6}",
                "ID", "Name", "Email", "Hired", "Salary", "Dept"
            );
            for e in &employees {
                println!(
                    "{:<5} {:<20} {:<25} {:<12} {:>10} {:>6}",
                    e.id,
                    e.name,
                    e.email,
                    e.hire_date.to_string(),
                    e.salary.to_string(),
                    e.department_id
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            println!();
            println!("   {} active employee(s)", employees.len());
        }

        EmployeeAction::Deactivate { employee_id } => {
            service.deactivate(actor, employee_id).await?;
            println!("✅ Employee {} deactivated", employee_id);
        }

        EmployeeAction::Reassign {
            employee_id,
            department,
        } => {
            service.reassign(actor, employee_id, department).await?;
            match department {
                Some(dept) => println!("✅ Employee {} moved to department {}", employee_id, dept),
                None => println!("✅ Employee {} unassigned", employee_id),
            }
        }
    }

    Ok(())
}
