//! Project entity - workload signal for headcount planning.
//!
//! Upstream data carries project status as free text; the engine
//! normalizes it to a closed set at the boundary.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized project status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
    Cancelled,
}

impl ProjectStatus {
    /// Code string for the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on_hold",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    /// Normalize free-text status to the closed set.
    ///
    /// Accepts the spellings seen in upstream data; anything else is an
    /// `UnknownProjectStatus` error, never a silent default.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "active" | "in_progress" | "ongoing" => Ok(ProjectStatus::Active),
            "completed" | "done" | "finished" => Ok(ProjectStatus::Completed),
            "on_hold" | "onhold" | "paused" => Ok(ProjectStatus::OnHold),
            "cancelled" | "canceled" => Ok(ProjectStatus::Cancelled),
            _ => Err(CoreError::UnknownProjectStatus(s.to_string())),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A project owned by a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub department_id: Option<i64>,
    pub name: String,
    pub status: ProjectStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_free_text() {
        assert_eq!(ProjectStatus::parse("Active").unwrap(), ProjectStatus::Active);
        assert_eq!(
            ProjectStatus::parse("In Progress").unwrap(),
            ProjectStatus::Active
        );
        assert_eq!(ProjectStatus::parse("ON HOLD").unwrap(), ProjectStatus::OnHold);
        assert_eq!(
            ProjectStatus::parse("canceled").unwrap(),
            ProjectStatus::Cancelled
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = ProjectStatus::parse("maybe later").unwrap_err();
        assert!(err.is_invalid_state());
    }
}
