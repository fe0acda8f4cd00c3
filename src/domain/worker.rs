//! Workers and chiefs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ChiefId, WorkerId};
use super::skills::SkillSet;

/// A field worker who can be assigned to tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,

    pub name: String,

    /// Department name; empty when the worker belongs to none
    #[serde(default)]
    pub department: String,

    #[serde(default)]
    pub skills: SkillSet,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Worker {
    /// Creates a worker with no department, skills or contact details
    pub fn new(id: WorkerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            department: String::new(),
            skills: SkillSet::new(),
            phone_number: None,
            email: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.skills = skills;
        self
    }
}

/// A chief who proposes tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chief {
    pub id: ChiefId,

    pub name: String,

    #[serde(default)]
    pub department: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub created_at: DateTime<Utc>,
}
