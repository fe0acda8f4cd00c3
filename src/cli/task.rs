//! Task CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use super::worker::{display_or_dash, skills_or_dash};
use crate::domain::{ChiefId, DateRange, Priority, TaskId, TaskStatus, WorkerId};
use crate::storage::{NewTask, Project};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Propose a task on behalf of a chief
    ///
    /// Examples:
    ///   crew task add "Fix boiler" --chief 1 --start 2024-01-10 --end 2024-01-12
    ///   crew task add "Rewire panel" --chief 1 --skills electrical --department Maintenance \
    ///       --priority high --days 2 --start 2024-02-01 --end 2024-02-02
    Add {
        /// Task title
        title: String,

        /// Proposing chief ID
        #[arg(long, short)]
        chief: String,

        /// First day of the task (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Last day of the task (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Comma-separated required skills
        #[arg(long, short, value_delimiter = ',')]
        skills: Vec<String>,

        /// Required department (empty means any)
        #[arg(long, short, default_value = "")]
        department: String,

        /// low, medium or high
        #[arg(long, short, default_value = "medium")]
        priority: Priority,

        /// Estimated working days
        #[arg(long, default_value_t = 1)]
        days: u32,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// List tasks, newest first
    List {
        /// Only tasks in this status (pending, matched, assigned)
        #[arg(long, short)]
        status: Option<TaskStatus>,
    },

    /// Show task details
    Show {
        /// Task ID
        id: String,
    },

    /// Delete a task and its assignments
    Remove {
        /// Task ID
        id: String,
    },

    /// Record a proposed worker for a task
    Propose {
        /// Task ID
        task: String,

        /// Worker ID
        worker: String,
    },

    /// Overwrite a task's status
    SetStatus {
        /// Task ID
        id: String,

        /// pending, matched or assigned
        status: TaskStatus,
    },
}

pub fn run(cmd: TaskCommands, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add {
            title,
            chief,
            start,
            end,
            skills,
            department,
            priority,
            days,
            description,
        } => {
            let chief_id: ChiefId = chief.parse()?;
            add_task(
                output,
                NewTask {
                    chief_id,
                    title,
                    description,
                    required_skills: skills.into_iter().collect(),
                    required_department: department,
                    priority,
                    estimated_days: days,
                    dates: DateRange::new(start, end),
                },
            )
        }
        TaskCommands::List { status } => list_tasks(output, status),
        TaskCommands::Show { id } => show_task(output, &id),
        TaskCommands::Remove { id } => remove_task(output, &id),
        TaskCommands::Propose { task, worker } => propose_worker(output, &task, &worker),
        TaskCommands::SetStatus { id, status } => set_status(output, &id, status),
    }
}

fn add_task(output: &Output, new: NewTask) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let task = store.create_task(new).context("Failed to create task")?;

    output.created(task.id.get(), &format!("Created task: {}", task.title));
    Ok(())
}

fn list_tasks(output: &Output, status: Option<TaskStatus>) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.store()?;

    let tasks = match status {
        Some(status) => store.tasks_with_status(status)?,
        None => store.tasks()?,
    };

    if output.is_json() {
        output.data(&tasks);
    } else if tasks.is_empty() {
        match status {
            Some(status) => println!("No {} tasks", status),
            None => println!("No tasks"),
        }
    } else {
        println!(
            "{:<6} {:<10} {:<8} {:<24} TITLE",
            "ID", "STATUS", "PRIORITY", "DATES"
        );
        println!("{}", "-".repeat(70));
        for task in &tasks {
            println!(
                "{:<6} {:<10} {:<8} {:<24} {}",
                task.id, task.status, task.priority, task.dates, task.title
            );
        }
    }

    Ok(())
}

fn show_task(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.store()?;

    let id: TaskId = id_str.parse()?;
    let task = store.require_task(id)?;

    if output.is_json() {
        output.data(&task);
        return Ok(());
    }

    println!("Task: {}", task.id);
    println!("Title: {}", task.title);
    println!("Status: {}", task.status);
    println!("Priority: {}", task.priority);
    println!("Chief: {} ({})", task.chief_name, task.chief_id);
    println!("Dates: {} ({} days estimated)", task.dates, task.estimated_days);
    println!("Skills: {}", skills_or_dash(&task.required_skills));
    println!("Department: {}", display_or_dash(&task.required_department));
    if let Some(worker) = task.matched_worker_id {
        match store.worker(worker)? {
            Some(w) => println!("Worker: {} ({})", w.name, w.id),
            None => println!("Worker: {} (deleted)", worker),
        }
    }
    println!("Created: {}", task.created_at.format("%Y-%m-%d %H:%M"));

    if let Some(desc) = &task.description {
        println!("\nDescription:");
        println!("{}", desc);
    }

    Ok(())
}

fn remove_task(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let id: TaskId = id_str.parse()?;
    let assignments = store.delete_task(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "message": "Task deleted successfully",
            "assignments_removed": assignments,
        }));
    } else {
        output.success(&format!(
            "Deleted task {} ({} assignments removed)",
            id, assignments
        ));
    }

    Ok(())
}

fn propose_worker(output: &Output, task_str: &str, worker_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let task_id: TaskId = task_str.parse()?;
    let worker_id: WorkerId = worker_str.parse()?;
    let task = store.propose_worker(task_id, worker_id)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id,
            "status": task.status,
            "matched_worker_id": task.matched_worker_id,
        }));
    } else {
        output.success(&format!("Proposed worker {} for task {}", worker_id, task.id));
    }

    Ok(())
}

fn set_status(output: &Output, id_str: &str, status: TaskStatus) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let id: TaskId = id_str.parse()?;
    let task = store.set_task_status(id, status)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id,
            "status": task.status,
        }));
    } else {
        output.success(&format!("Task {} is now {}", task.id, task.status));
    }

    Ok(())
}
