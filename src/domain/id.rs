//! Integer identifiers for stored records
//!
//! Every collection keys its records by an integer assigned by the store
//! (SQLite rowid). Each collection gets its own newtype so a worker id can
//! never be passed where a task id is expected.
//!
//! On the command line ids may be written bare (`7`) or with the collection
//! prefix (`w-7`, `t-7`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid {kind} ID: expected a positive integer or '{prefix}-{{n}}', got '{value}'")]
    Invalid {
        kind: &'static str,
        prefix: &'static str,
        value: String,
    },
}

macro_rules! record_id {
    ($(#[$doc:meta])* $name:ident, $kind:literal, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Human-readable collection name, used in error messages
            pub const KIND: &'static str = $kind;

            /// Short prefix accepted when parsing
            pub const PREFIX: &'static str = $prefix;

            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw integer value
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let digits = trimmed
                    .strip_prefix(concat!($prefix, "-"))
                    .unwrap_or(trimmed);

                match digits.parse::<i64>() {
                    Ok(n) if n > 0 => Ok(Self(n)),
                    _ => Err(IdError::Invalid {
                        kind: $kind,
                        prefix: $prefix,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

record_id!(
    /// Identifier of a field worker
    WorkerId, "worker", "w"
);
record_id!(
    /// Identifier of a chief (task proposer)
    ChiefId, "chief", "c"
);
record_id!(
    /// Identifier of an availability period
    PeriodId, "availability period", "p"
);
record_id!(
    /// Identifier of a proposed task
    TaskId, "task", "t"
);
record_id!(
    /// Identifier of a task assignment
    AssignmentId, "assignment", "a"
);
