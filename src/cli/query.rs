//! Query commands (match, status)
//!
//! Both read the store without writing to it.

use anyhow::{Context, Result};

use super::output::Output;
use super::worker::display_or_dash;
use crate::storage::Project;

/// Rank candidate workers for every pending task
pub fn run_match(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    tracing::debug!(root = %project.root().display(), "opened project");

    let mut store = project.store()?;
    let input = store.snapshot().context("Failed to read records for matching")?;
    tracing::debug!(
        tasks = input.tasks.len(),
        workers = input.workers.len(),
        periods = input.availability.len(),
        assignments = input.assignments.len(),
        "loaded match input"
    );

    let report = project.matcher().run(&input);
    tracing::debug!(matched = report.count, "matching finished");

    if output.is_json() {
        output.data(&report);
        return Ok(());
    }

    if report.is_empty() {
        println!("No tasks with available workers.");
        return Ok(());
    }

    println!("Matches ({} tasks):", report.count);
    for entry in &report.matches {
        let task = &entry.task;
        println!();
        println!("[{}] {} ({}, {})", task.id, task.title, task.dates, task.priority);
        println!(
            "  {:<6} {:<24} {:<16} {:>5}  SKILL  DEPT  AVAIL",
            "WORKER", "NAME", "DEPARTMENT", "SCORE"
        );
        for candidate in &entry.candidates {
            let b = &candidate.breakdown;
            println!(
                "  {:<6} {:<24} {:<16} {:>5.0}  {:>5.0}  {:>4.0}  {:>5.0}",
                candidate.worker_id,
                candidate.worker_name,
                display_or_dash(&candidate.worker_department),
                candidate.score,
                b.skill,
                b.department,
                b.availability
            );
        }
    }

    Ok(())
}

/// Show record counts
pub fn status(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let counts = project.store()?.counts()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "workers": counts.workers,
            "chiefs": counts.chiefs,
            "availability_periods": counts.periods,
            "tasks": {
                "total": counts.tasks(),
                "pending": counts.tasks_pending,
                "matched": counts.tasks_matched,
                "assigned": counts.tasks_assigned,
            },
            "active_assignments": counts.assignments,
        }));
    } else {
        println!("Project: {}", project.root().display());
        println!();
        println!("Workers:              {}", counts.workers);
        println!("Chiefs:               {}", counts.chiefs);
        println!("Availability periods: {}", counts.periods);
        println!(
            "Tasks:                {} ({} pending, {} matched, {} assigned)",
            counts.tasks(),
            counts.tasks_pending,
            counts.tasks_matched,
            counts.tasks_assigned
        );
        println!("Active assignments:   {}", counts.assignments);
    }

    Ok(())
}
