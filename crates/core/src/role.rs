//! # Role Module
//!
//! Roles and capabilities for the policy gate.
//!
//! Access control itself lives outside the engine; business operations
//! only ask an injected [`PolicyGate`] whether an actor holds a
//! capability. No ambient permission state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Roles recognized by the default policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Read/write employees, run salary adjustments
    HrAdministrator,
    /// Read/write payroll, run the monthly payroll report
    PayrollManager,
    /// Read-only department summaries
    DepartmentLead,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::HrAdministrator => "hr_administrator",
            Role::PayrollManager => "payroll_manager",
            Role::DepartmentLead => "department_lead",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hr_administrator" => Some(Role::HrAdministrator),
            "payroll_manager" => Some(Role::PayrollManager),
            "department_lead" => Some(Role::DepartmentLead),
            _ => None,
        }
    }

    /// Whether this role carries the given capability
    pub fn allows(&self, capability: Capability) -> bool {
        use Capability::*;
        match self {
            Role::HrAdministrator => matches!(
                capability,
                ManageEmployees | AdjustSalaries | ViewRetentionRisk | ViewDepartmentSummary
            ),
            Role::PayrollManager => {
                matches!(capability, ManagePayroll | RunPayrollReport | ViewDepartmentSummary)
            }
            Role::DepartmentLead => matches!(capability, ViewDepartmentSummary),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capabilities business operations check before acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageEmployees,
    AdjustSalaries,
    ManagePayroll,
    RunPayrollReport,
    ViewDepartmentSummary,
    ViewRetentionRisk,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageEmployees => "ManageEmployees",
            Capability::AdjustSalaries => "AdjustSalaries",
            Capability::ManagePayroll => "ManagePayroll",
            Capability::RunPayrollReport => "RunPayrollReport",
            Capability::ViewDepartmentSummary => "ViewDepartmentSummary",
            Capability::ViewRetentionRisk => "ViewRetentionRisk",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capability check hook injected into every business operation.
pub trait PolicyGate: Send + Sync {
    fn allows(&self, actor: &str, capability: Capability) -> bool;
}

/// Gate that permits everything. For embedding and tests.
#[derive(Debug, Default)]
pub struct AllowAll;

impl PolicyGate for AllowAll {
    fn allows(&self, _actor: &str, _capability: Capability) -> bool {
        true
    }
}

/// Actor -> role lookup table. Unknown actors hold no capabilities.
#[derive(Debug, Default)]
pub struct RoleTable {
    roles: HashMap<String, Role>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(mut self, actor: &str, role: Role) -> Self {
        self.roles.insert(actor.to_string(), role);
        self
    }

    pub fn role_of(&self, actor: &str) -> Option<Role> {
        self.roles.get(actor).copied()
    }
}

impl PolicyGate for RoleTable {
    fn allows(&self, actor: &str, capability: Capability) -> bool {
        self.role_of(actor)
            .map(|role| role.allows(capability))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        assert!(Role::HrAdministrator.allows(Capability::AdjustSalaries));
        assert!(!Role::HrAdministrator.allows(Capability::RunPayrollReport));
        assert!(Role::PayrollManager.allows(Capability::RunPayrollReport));
        assert!(!Role::PayrollManager.allows(Capability::AdjustSalaries));
        assert!(Role::DepartmentLead.allows(Capability::ViewDepartmentSummary));
        assert!(!Role::DepartmentLead.allows(Capability::ManageEmployees));
    }

    #[test]
    fn test_role_table_gate() {
        let gate = RoleTable::new()
            .assign("alice", Role::HrAdministrator)
            .assign("bob", Role::DepartmentLead);

        assert!(gate.allows("alice", Capability::AdjustSalaries));
        assert!(!gate.allows("bob", Capability::AdjustSalaries));
        // Unknown actor
        assert!(!gate.allows("mallory", Capability::ViewDepartmentSummary));
    }

    #[test]
    fn test_allow_all() {
        assert!(AllowAll.allows("anyone", Capability::ManagePayroll));
    }
}
