//! Task domain model
//!
//! Tasks are proposed by chiefs and describe a job over a date range, with
//! optional skill and department requirements. Only pending tasks take part
//! in matching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dates::DateRange;
use super::id::{ChiefId, TaskId, WorkerId};
use super::skills::SkillSet;

/// Lifecycle of a task
///
/// `pending` → `matched` (a worker was proposed) → `assigned` (confirmed).
/// Cancelling an assignment returns the task to `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Matched,
    Assigned,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Matched => "matched",
            TaskStatus::Assigned => "assigned",
        }
    }

    /// Returns true if the task is still waiting for a worker
    pub fn is_pending(&self) -> bool {
        matches!(self, TaskStatus::Pending)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "matched" => Ok(TaskStatus::Matched),
            "assigned" => Ok(TaskStatus::Assigned),
            other => Err(format!(
                "Invalid task status '{}': expected pending, matched or assigned",
                other
            )),
        }
    }
}

/// Urgency assigned by the proposing chief
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "Invalid priority '{}': expected low, medium or high",
                other
            )),
        }
    }
}

/// A proposed task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,

    pub title: String,

    /// Chief who proposed the task
    pub chief_id: ChiefId,

    /// Chief name at proposal time
    pub chief_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Empty means no skill requirement
    #[serde(default)]
    pub required_skills: SkillSet,

    /// Empty means any department
    #[serde(default)]
    pub required_department: String,

    #[serde(default)]
    pub priority: Priority,

    pub estimated_days: u32,

    #[serde(flatten)]
    pub dates: DateRange,

    pub status: TaskStatus,

    /// Worker proposed for or assigned to this task
    #[serde(default)]
    pub matched_worker_id: Option<WorkerId>,

    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task with no requirements
    pub fn new(id: TaskId, title: impl Into<String>, dates: DateRange) -> Self {
        Self {
            id,
            title: title.into(),
            chief_id: ChiefId::new(1),
            chief_name: String::new(),
            description: None,
            required_skills: SkillSet::new(),
            required_department: String::new(),
            priority: Priority::default(),
            estimated_days: 1,
            dates,
            status: TaskStatus::Pending,
            matched_worker_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.required_skills = skills;
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.required_department = department.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns true if the task names a required department
    pub fn requires_department(&self) -> bool {
        !self.required_department.is_empty()
    }
}
