//! Skill sets
//!
//! Workers carry the skills they have; tasks carry the skills they require.
//! Both are true sets here. The comma-joined form (`welding,electrical`)
//! only exists at the edges: the SQLite columns and the `--skills` flag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An ordered set of skill names
///
/// Names are compared exactly (case-sensitive). Surrounding whitespace and
/// empty entries are dropped when parsing the comma form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    /// Creates an empty skill set
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Parses the comma-joined storage form
    pub fn from_csv(csv: &str) -> Self {
        csv.split(',').collect()
    }

    /// Renders the comma-joined storage form
    pub fn to_csv(&self) -> String {
        self.0.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }

    /// Adds a skill, returning true if it was not present
    pub fn insert(&mut self, skill: impl AsRef<str>) -> bool {
        let skill = skill.as_ref().trim();
        if skill.is_empty() {
            return false;
        }
        self.0.insert(skill.to_string())
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of skills present in both sets
    pub fn overlap(&self, other: &SkillSet) -> usize {
        self.0.intersection(&other.0).count()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

impl fmt::Display for SkillSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.iter().collect::<Vec<_>>().join(", "))
    }
}
