//! Task assignments
//!
//! An assignment commits a worker to a date range. Active assignments block
//! the worker from any other task whose range overlaps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dates::DateRange;
use super::id::{AssignmentId, TaskId, WorkerId};
use super::task::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Assigned,
    Cancelled,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true if the assignment still holds the worker's time
    pub fn is_active(&self) -> bool {
        matches!(self, AssignmentStatus::Assigned)
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(AssignmentStatus::Assigned),
            "cancelled" => Ok(AssignmentStatus::Cancelled),
            other => Err(format!("Invalid assignment status '{}'", other)),
        }
    }
}

/// A worker's committed date range for a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,

    pub task_id: TaskId,

    pub worker_id: WorkerId,

    #[serde(flatten)]
    pub dates: DateRange,

    /// Score the match had when it was confirmed
    #[serde(default)]
    pub match_score: f64,

    pub status: AssignmentStatus,

    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(id: AssignmentId, task_id: TaskId, worker_id: WorkerId, dates: DateRange) -> Self {
        Self {
            id,
            task_id,
            worker_id,
            dates,
            match_score: 0.0,
            status: AssignmentStatus::Assigned,
            created_at: Utc::now(),
        }
    }

    /// True if this assignment is active and its range overlaps `range`
    pub fn blocks(&self, range: &DateRange) -> bool {
        self.status.is_active() && self.dates.overlaps(range)
    }
}

/// An assignment joined with its task and worker, for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentView {
    #[serde(flatten)]
    pub assignment: Assignment,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub priority: Priority,

    pub worker_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(start: &str, end: &str) -> Assignment {
        Assignment::new(
            AssignmentId::new(1),
            TaskId::new(1),
            WorkerId::new(1),
            DateRange::new(start, end),
        )
    }

    #[test]
    fn active_overlap_blocks() {
        let a = assignment("2024-01-11", "2024-01-15");
        assert!(a.blocks(&DateRange::new("2024-01-10", "2024-01-12")));
        assert!(!a.blocks(&DateRange::new("2024-01-16", "2024-01-20")));
    }

    #[test]
    fn cancelled_never_blocks() {
        let mut a = assignment("2024-01-11", "2024-01-15");
        a.status = AssignmentStatus::Cancelled;
        assert!(!a.blocks(&DateRange::new("2024-01-10", "2024-01-12")));
    }
}
