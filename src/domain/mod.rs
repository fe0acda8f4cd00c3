//! Domain models for crew
//!
//! Contains the records and the matching engine without any I/O concerns.

mod assignment;
mod availability;
mod dates;
mod id;
pub mod matcher;
mod skills;
mod task;
mod worker;

pub use assignment::{Assignment, AssignmentStatus, AssignmentView};
pub use availability::AvailabilityPeriod;
pub use dates::{validate_day, DateError, DateRange, DATE_FORMAT};
pub use id::{AssignmentId, ChiefId, IdError, PeriodId, TaskId, WorkerId};
pub use matcher::{Candidate, MatchInput, MatchReport, Matcher, ScoreBreakdown, TaskMatches};
pub use skills::SkillSet;
pub use task::{Priority, Task, TaskStatus};
pub use worker::{Chief, Worker};
