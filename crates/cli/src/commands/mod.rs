//! CLI command handlers

pub mod adjust;
pub mod analysis;
pub mod employee;
pub mod report;
