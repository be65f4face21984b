//! # Staffledger Business
//!
//! Orchestration layer for the HR/payroll rules engine.
//!
//! Each service borrows a [`ServiceContext`] (pool + capability gate),
//! checks the actor's capability first, and runs its reads and writes
//! on one transaction. Rule arithmetic lives in `staffledger-core`;
//! this crate wires it to the ledger.
//!
//! ## Services
//!
//! - [`AdjustmentService`] - batch salary adjustments with audit capture
//! - [`BonusService`] - performance bonus calculation and award
//! - [`PlanningService`] - budget compliance and headcount planning
//! - [`RetentionService`] - retention risk assessment
//! - [`DirectoryService`] - hires, deactivations, reassignments
//! - [`ReportingService`] - capability-gated report generation

pub mod adjustment;
pub mod bonus;
pub mod directory;
pub mod error;
pub mod planning;
pub mod reporting;
pub mod retention;
pub mod services;

pub use adjustment::{AdjustmentReport, AdjustmentService, EmployeeAdjustment};
pub use bonus::{BonusService, EmployeeBonus};
pub use directory::DirectoryService;
pub use error::{BusinessError, BusinessResult};
pub use planning::PlanningService;
pub use reporting::ReportingService;
pub use retention::RetentionService;
pub use services::ServiceContext;
