//! Assignment CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::{AssignmentId, DateRange, TaskId, WorkerId};
use crate::storage::{NewAssignment, Project};

#[derive(Subcommand)]
pub enum AssignCommands {
    /// Commit a worker to a task
    ///
    /// Dates default to the task's own range.
    ///
    /// Examples:
    ///   crew assign confirm 3 1 --score 85
    Confirm {
        /// Task ID
        task: String,

        /// Worker ID
        worker: String,

        /// First assigned day (YYYY-MM-DD)
        #[arg(long, requires = "end")]
        start: Option<String>,

        /// Last assigned day (YYYY-MM-DD)
        #[arg(long, requires = "start")]
        end: Option<String>,

        /// Match score to record
        #[arg(long)]
        score: Option<f64>,
    },

    /// List assignments, ordered by start date
    List,

    /// Cancel an assignment and return its task to pending
    Cancel {
        /// Assignment ID
        id: String,
    },
}

pub fn run(cmd: AssignCommands, output: &Output) -> Result<()> {
    match cmd {
        AssignCommands::Confirm {
            task,
            worker,
            start,
            end,
            score,
        } => {
            let dates = match (start, end) {
                (Some(start), Some(end)) => Some(DateRange::new(start, end)),
                _ => None,
            };
            confirm(output, &task, &worker, dates, score)
        }
        AssignCommands::List => list_assignments(output),
        AssignCommands::Cancel { id } => cancel(output, &id),
    }
}

fn confirm(
    output: &Output,
    task_str: &str,
    worker_str: &str,
    dates: Option<DateRange>,
    match_score: Option<f64>,
) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let task_id: TaskId = task_str.parse()?;
    let worker_id: WorkerId = worker_str.parse()?;

    let assignment = store
        .confirm_assignment(NewAssignment {
            task_id,
            worker_id,
            dates,
            match_score,
        })
        .context("Failed to confirm assignment")?;

    output.created(
        assignment.id.get(),
        &format!(
            "Assigned worker {} to task {} ({})",
            assignment.worker_id, assignment.task_id, assignment.dates
        ),
    );
    Ok(())
}

fn list_assignments(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.store()?;

    let assignments = store.assignments()?;

    if output.is_json() {
        output.data(&assignments);
    } else if assignments.is_empty() {
        println!("No assignments");
    } else {
        println!(
            "{:<6} {:<24} {:<18} {:<24} SCORE",
            "ID", "TASK", "WORKER", "DATES"
        );
        println!("{}", "-".repeat(80));
        for view in &assignments {
            let a = &view.assignment;
            println!(
                "{:<6} {:<24} {:<18} {:<24} {:.0}",
                a.id, view.title, view.worker_name, a.dates, a.match_score
            );
        }
    }

    Ok(())
}

fn cancel(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let id: AssignmentId = id_str.parse()?;
    let task = store.cancel_assignment(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "task_id": task,
            "message": "Assignment cancelled",
        }));
    } else {
        output.success(&format!(
            "Cancelled assignment {}; task {} is pending again",
            id, task
        ));
    }

    Ok(())
}
