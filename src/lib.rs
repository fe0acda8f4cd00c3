//! Crew Match - assign field workers to proposed tasks
//!
//! Chiefs propose tasks that need certain skills, a department and a date
//! range. Workers record when they are free. The matcher ranks, for every
//! pending task, the workers who are free for the whole range and not
//! already booked, scoring skill overlap and department fit on top.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Candidate, MatchInput, MatchReport, Matcher, Task, TaskId, TaskStatus, Worker, WorkerId};
