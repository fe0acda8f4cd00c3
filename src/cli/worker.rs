//! Worker CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::{SkillSet, WorkerId};
use crate::storage::{NewWorker, Project};

#[derive(Subcommand)]
pub enum WorkerCommands {
    /// Register a worker
    ///
    /// Examples:
    ///   crew worker add "Ana Ruiz" --department Maintenance --skills welding,electrical
    Add {
        /// Worker name
        name: String,

        /// Department the worker belongs to
        #[arg(long, short, default_value = "")]
        department: String,

        /// Comma-separated skills
        #[arg(long, short, value_delimiter = ',')]
        skills: Vec<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Email address
        #[arg(long)]
        email: Option<String>,
    },

    /// List workers
    List,

    /// Show a worker with their availability
    Show {
        /// Worker ID
        id: String,
    },

    /// Delete a worker, their availability and their assignments
    Remove {
        /// Worker ID
        id: String,
    },
}

pub fn run(cmd: WorkerCommands, output: &Output) -> Result<()> {
    match cmd {
        WorkerCommands::Add {
            name,
            department,
            skills,
            phone,
            email,
        } => add_worker(
            output,
            NewWorker {
                name,
                department,
                skills: skills.into_iter().collect(),
                phone_number: phone,
                email,
            },
        ),
        WorkerCommands::List => list_workers(output),
        WorkerCommands::Show { id } => show_worker(output, &id),
        WorkerCommands::Remove { id } => remove_worker(output, &id),
    }
}

fn add_worker(output: &Output, new: NewWorker) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let worker = store.create_worker(new).context("Failed to create worker")?;

    output.created(
        worker.id.get(),
        &format!("Created worker: {}", worker.name),
    );
    Ok(())
}

fn list_workers(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.store()?;

    let workers = store.workers()?;

    if output.is_json() {
        output.data(&workers);
    } else if workers.is_empty() {
        println!("No workers");
    } else {
        println!("{:<6} {:<24} {:<16} SKILLS", "ID", "NAME", "DEPARTMENT");
        println!("{}", "-".repeat(70));
        for worker in &workers {
            println!(
                "{:<6} {:<24} {:<16} {}",
                worker.id,
                worker.name,
                display_or_dash(&worker.department),
                skills_or_dash(&worker.skills)
            );
        }
    }

    Ok(())
}

fn show_worker(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.store()?;

    let id: WorkerId = id_str.parse()?;
    let worker = store.require_worker(id)?;
    let periods = store.periods_for(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "worker": worker,
            "availability": periods,
        }));
        return Ok(());
    }

    println!("Worker: {}", worker.id);
    println!("Name: {}", worker.name);
    println!("Department: {}", display_or_dash(&worker.department));
    println!("Skills: {}", skills_or_dash(&worker.skills));
    if let Some(phone) = &worker.phone_number {
        println!("Phone: {}", phone);
    }
    if let Some(email) = &worker.email {
        println!("Email: {}", email);
    }
    println!("Created: {}", worker.created_at.format("%Y-%m-%d %H:%M"));

    if periods.is_empty() {
        println!("\nNo availability recorded");
    } else {
        println!("\nAvailability:");
        for period in &periods {
            println!("  [{}] {}", period.id, period.dates);
        }
    }

    Ok(())
}

fn remove_worker(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let id: WorkerId = id_str.parse()?;
    let removal = store.delete_worker(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "message": "Worker deleted successfully",
            "removed": removal,
        }));
    } else {
        output.success(&format!(
            "Deleted worker {} ({} availability periods, {} assignments removed; {} tasks back to pending)",
            id, removal.periods, removal.assignments, removal.tasks_reset
        ));
    }

    Ok(())
}

pub(super) fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

pub(super) fn skills_or_dash(skills: &SkillSet) -> String {
    if skills.is_empty() {
        "-".to_string()
    } else {
        skills.to_string()
    }
}
