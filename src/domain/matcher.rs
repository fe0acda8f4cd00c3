//! Worker/task matching
//!
//! Scores every pending task against every worker and keeps the best few
//! workers per task. Each task is scored on its own; there is no joint
//! optimization across tasks, and nothing here touches storage.
//!
//! ## Scoring (max 100)
//!
//! | Part | Points | Rule |
//! |------|--------|------|
//! | Skill | 0–30 | `30 × shared / required`; 0 when the task requires no skills |
//! | Department | 0 or 30 | required department is set and equals the worker's |
//! | Availability | 0 or 40 | a period covers the task range and no active assignment overlaps it |
//!
//! Only workers that earn the availability points become candidates. Skill
//! and department points rank candidates among themselves.

use std::collections::HashMap;

use serde::Serialize;

use super::assignment::Assignment;
use super::availability::AvailabilityPeriod;
use super::id::{PeriodId, TaskId, WorkerId};
use super::skills::SkillSet;
use super::task::Task;
use super::worker::Worker;

/// Candidates kept per task unless configured otherwise
pub const DEFAULT_MAX_CANDIDATES: usize = 3;

pub const SKILL_POINTS: f64 = 30.0;
pub const DEPARTMENT_POINTS: f64 = 30.0;
pub const AVAILABILITY_POINTS: f64 = 40.0;

/// How a candidate's score was made up
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub skill: f64,
    pub department: f64,
    pub availability: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.skill + self.department + self.availability
    }
}

/// A worker proposed for a task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub task_id: TaskId,
    pub task_title: String,
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub worker_department: String,
    pub worker_skills: SkillSet,
    pub score: f64,
    pub has_availability: bool,
    pub breakdown: ScoreBreakdown,

    /// First period (in input order) that covers the task range
    pub covering_period_id: Option<PeriodId>,
}

/// A task paired with its best candidates, highest score first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskMatches {
    pub task: Task,
    pub candidates: Vec<Candidate>,
}

/// Result of one matching run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub matches: Vec<TaskMatches>,
    pub count: usize,
}

impl MatchReport {
    pub fn new(matches: Vec<TaskMatches>) -> Self {
        let count = matches.len();
        Self { matches, count }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// A consistent snapshot of the four record collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchInput {
    pub tasks: Vec<Task>,
    pub workers: Vec<Worker>,
    pub availability: Vec<AvailabilityPeriod>,
    pub assignments: Vec<Assignment>,
}

/// Per-run lookup of each worker's periods and active assignments
///
/// Input order is kept inside each list so "first covering period" means
/// the same thing as a linear scan would.
struct WorkerIndex<'a> {
    periods: HashMap<WorkerId, Vec<&'a AvailabilityPeriod>>,
    bookings: HashMap<WorkerId, Vec<&'a Assignment>>,
}

impl<'a> WorkerIndex<'a> {
    fn build(availability: &'a [AvailabilityPeriod], assignments: &'a [Assignment]) -> Self {
        let mut periods: HashMap<WorkerId, Vec<&AvailabilityPeriod>> = HashMap::new();
        for period in availability {
            periods.entry(period.worker_id).or_default().push(period);
        }

        let mut bookings: HashMap<WorkerId, Vec<&Assignment>> = HashMap::new();
        for assignment in assignments.iter().filter(|a| a.status.is_active()) {
            bookings.entry(assignment.worker_id).or_default().push(assignment);
        }

        Self { periods, bookings }
    }

    fn periods(&self, worker: WorkerId) -> &[&'a AvailabilityPeriod] {
        self.periods.get(&worker).map(Vec::as_slice).unwrap_or(&[])
    }

    fn bookings(&self, worker: WorkerId) -> &[&'a Assignment] {
        self.bookings.get(&worker).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Skill points for a task/worker pair
pub fn skill_score(task: &Task, worker: &Worker) -> f64 {
    let required = task.required_skills.len();
    if required == 0 {
        return 0.0;
    }
    SKILL_POINTS * task.required_skills.overlap(&worker.skills) as f64 / required as f64
}

/// Department points for a task/worker pair
pub fn department_score(task: &Task, worker: &Worker) -> f64 {
    if task.requires_department() && worker.department == task.required_department {
        DEPARTMENT_POINTS
    } else {
        0.0
    }
}

/// Ranks workers for pending tasks
#[derive(Debug, Clone)]
pub struct Matcher {
    max_candidates: usize,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many candidates survive per task (0 falls back to the default)
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = if max_candidates == 0 {
            DEFAULT_MAX_CANDIDATES
        } else {
            max_candidates
        };
        self
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Runs the matcher over a snapshot
    pub fn run(&self, input: &MatchInput) -> MatchReport {
        MatchReport::new(self.match_tasks(
            &input.tasks,
            &input.workers,
            &input.availability,
            &input.assignments,
        ))
    }

    /// Produces ranked candidates for every pending task that has at least one
    ///
    /// Tasks keep their input order. Non-pending tasks and cancelled
    /// assignments are ignored, so callers may pass unfiltered collections.
    pub fn match_tasks(
        &self,
        tasks: &[Task],
        workers: &[Worker],
        availability: &[AvailabilityPeriod],
        assignments: &[Assignment],
    ) -> Vec<TaskMatches> {
        let index = WorkerIndex::build(availability, assignments);

        let matches: Vec<TaskMatches> = tasks
            .iter()
            .filter(|task| task.status.is_pending())
            .filter_map(|task| {
                let candidates = self.rank(task, workers, &index);
                if candidates.is_empty() {
                    tracing::trace!(task = %task.id, "no eligible workers");
                    None
                } else {
                    Some(TaskMatches {
                        task: task.clone(),
                        candidates,
                    })
                }
            })
            .collect();

        tracing::debug!(
            tasks = tasks.len(),
            workers = workers.len(),
            periods = availability.len(),
            assignments = assignments.len(),
            matched = matches.len(),
            "matching run complete"
        );

        matches
    }

    fn rank(&self, task: &Task, workers: &[Worker], index: &WorkerIndex<'_>) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = workers
            .iter()
            .filter_map(|worker| self.evaluate(task, worker, index))
            .collect();

        // sort_by is stable: equal scores keep worker input order
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(self.max_candidates);
        candidates
    }

    /// Scores one pair, returning None when the worker is not available
    fn evaluate(&self, task: &Task, worker: &Worker, index: &WorkerIndex<'_>) -> Option<Candidate> {
        let covering = index
            .periods(worker.id)
            .iter()
            .find(|period| period.covers(&task.dates));

        let Some(period) = covering else {
            tracing::trace!(task = %task.id, worker = %worker.id, "no covering period");
            return None;
        };

        if let Some(booking) = index
            .bookings(worker.id)
            .iter()
            .find(|booking| booking.blocks(&task.dates))
        {
            tracing::trace!(
                task = %task.id,
                worker = %worker.id,
                assignment = %booking.id,
                "worker already booked"
            );
            return None;
        }

        let breakdown = ScoreBreakdown {
            skill: skill_score(task, worker),
            department: department_score(task, worker),
            availability: AVAILABILITY_POINTS,
        };
        let score = breakdown.total();

        tracing::trace!(task = %task.id, worker = %worker.id, score, "scored candidate");

        Some(Candidate {
            task_id: task.id,
            task_title: task.title.clone(),
            worker_id: worker.id,
            worker_name: worker.name.clone(),
            worker_department: worker.department.clone(),
            worker_skills: worker.skills.clone(),
            score,
            has_availability: true,
            breakdown,
            covering_period_id: Some(period.id),
        })
    }
}

/// Matches with the default candidate limit
pub fn match_tasks(
    tasks: &[Task],
    workers: &[Worker],
    availability: &[AvailabilityPeriod],
    assignments: &[Assignment],
) -> Vec<TaskMatches> {
    Matcher::default().match_tasks(tasks, workers, availability, assignments)
}
