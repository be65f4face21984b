//! # Staffledger Core
//!
//! Core domain types and rule evaluators for the HR/payroll engine:
//! Department, Employee, Project, PayrollRecord, AuditEntry, plus the
//! pure calculations for salary adjustment, performance bonus, budget
//! compliance, headcount planning, and retention risk.
//!
//! Everything here is pure - no I/O, no database. The persistence crate
//! supplies snapshots; the business crate applies the decisions.

pub mod adjustment;
pub mod audit;
pub mod bonus;
pub mod department;
pub mod employee;
pub mod error;
pub mod payroll;
pub mod planning;
pub mod project;
pub mod retention;
pub mod role;
pub mod tenure;

pub use adjustment::{AdjustmentParams, AdjustmentRule, SalaryDecision};
pub use audit::{salary_or_department_changed, AuditEntry, AuditOperation, EmployeeAuditSnapshot};
pub use bonus::{performance_bonus, BonusResult, BonusStatus, DEFAULT_BASE_BONUS_PERCENT};
pub use department::Department;
pub use employee::{Employee, EmployeeFilter};
pub use error::{CoreError, CoreResult};
pub use payroll::PayrollRecord;
pub use planning::{
    budget_compliance, headcount_plan, BudgetCompliance, BudgetStatus, HeadcountPlan,
    HeadcountRecommendation,
};
pub use project::{Project, ProjectStatus};
pub use retention::{
    in_transition_window, percentile_rank, risk_tier, RetentionAssessment, RiskTier,
};
pub use role::{AllowAll, Capability, PolicyGate, Role, RoleTable};
