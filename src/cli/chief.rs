//! Chief CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use super::worker::display_or_dash;
use crate::domain::ChiefId;
use crate::storage::{NewChief, Project};

#[derive(Subcommand)]
pub enum ChiefCommands {
    /// Register a chief
    Add {
        /// Chief name
        name: String,

        /// Department the chief runs
        #[arg(long, short, default_value = "")]
        department: String,

        /// Email address
        #[arg(long)]
        email: Option<String>,
    },

    /// List chiefs
    List,

    /// Delete a chief (their tasks are kept)
    Remove {
        /// Chief ID
        id: String,
    },
}

pub fn run(cmd: ChiefCommands, output: &Output) -> Result<()> {
    match cmd {
        ChiefCommands::Add {
            name,
            department,
            email,
        } => add_chief(
            output,
            NewChief {
                name,
                department,
                email,
            },
        ),
        ChiefCommands::List => list_chiefs(output),
        ChiefCommands::Remove { id } => remove_chief(output, &id),
    }
}

fn add_chief(output: &Output, new: NewChief) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let chief = store.create_chief(new).context("Failed to create chief")?;

    output.created(chief.id.get(), &format!("Created chief: {}", chief.name));
    Ok(())
}

fn list_chiefs(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.store()?;

    let chiefs = store.chiefs()?;

    if output.is_json() {
        output.data(&chiefs);
    } else if chiefs.is_empty() {
        println!("No chiefs");
    } else {
        println!("{:<6} {:<24} {:<16} EMAIL", "ID", "NAME", "DEPARTMENT");
        println!("{}", "-".repeat(70));
        for chief in &chiefs {
            println!(
                "{:<6} {:<24} {:<16} {}",
                chief.id,
                chief.name,
                display_or_dash(&chief.department),
                chief.email.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}

fn remove_chief(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.store()?;

    let id: ChiefId = id_str.parse()?;
    store.delete_chief(id)?;

    output.success(&format!("Deleted chief {}", id));
    Ok(())
}
