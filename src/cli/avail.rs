//! Availability CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::{DateRange, PeriodId, WorkerId};
use crate::storage::{NewPeriod, Project};

#[derive(Subcommand)]
pub enum AvailCommands {
    /// Record a period when a worker is free
    ///
    /// Examples:
    ///   crew avail add 1 2024-01-01 2024-01-31
    Add {
        /// Worker ID
        worker: String,

        /// First free day (YYYY-MM-DD)
        start: String,

        /// Last free day (YYYY-MM-DD)
        end: String,
    },

    /// List availability periods, ordered by start date
    List {
        /// Only this worker's periods
        #[arg(long, short)]
        worker: Option<String>,
    },

    /// Delete an availability period
    Remove {
        /// Period ID
        id: String,
    },
}

pub fn run(cmd: AvailCommands, output: &Output) -> Result<()> {
    match cmd {
        AvailCommands::Add { worker, start, end } => add_period(output, &worker, start, end),
        AvailCommands::List { worker } => list_periods(output, worker.as_deref()),
        AvailCommands::Remove { id } => remove_period(output, &id),
    }
}

fn add_period(output: &Output, worker_str: &str, start: String, end: String) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let worker_id: WorkerId = worker_str.parse()?;
    let period = store
        .create_period(NewPeriod {
            worker_id,
            dates: DateRange::new(start, end),
        })
        .context("Failed to add availability")?;

    output.created(
        period.id.get(),
        &format!("Worker {} available {}", period.worker_id, period.dates),
    );
    Ok(())
}

fn list_periods(output: &Output, worker: Option<&str>) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.store()?;

    let periods = match worker {
        Some(id) => {
            let worker_id: WorkerId = id.parse()?;
            store.require_worker(worker_id)?;
            store.periods_for(worker_id)?
        }
        None => store.periods()?,
    };

    if output.is_json() {
        output.data(&periods);
    } else if periods.is_empty() {
        println!("No availability periods");
    } else {
        println!("{:<6} {:<8} {:<12} END", "ID", "WORKER", "START");
        println!("{}", "-".repeat(40));
        for period in &periods {
            println!(
                "{:<6} {:<8} {:<12} {}",
                period.id, period.worker_id, period.dates.start, period.dates.end
            );
        }
    }

    Ok(())
}

fn remove_period(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let id: PeriodId = id_str.parse()?;
    store.delete_period(id)?;

    output.success(&format!("Deleted availability period {}", id));
    Ok(())
}
