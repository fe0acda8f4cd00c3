//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{assign, avail, chief, query, task, worker};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "crew")]
#[command(author, version, about = "Match field workers to proposed tasks")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new crew project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Show record counts
    Status,

    /// Manage workers
    #[command(subcommand)]
    Worker(worker::WorkerCommands),

    /// Manage chiefs
    #[command(subcommand)]
    Chief(chief::ChiefCommands),

    /// Manage worker availability periods
    #[command(subcommand)]
    Avail(avail::AvailCommands),

    /// Manage proposed tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Rank available workers for every pending task
    Match,

    /// Confirm, list and cancel assignments
    #[command(subcommand)]
    Assign(assign::AssignCommands),
}

/// Sets up `tracing` on stderr, filtered by `CREW_LOG` when set
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CREW_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format.into(),
    };
    let output = Output::new(format);

    tracing::debug!(?format, "crew starting");

    match cli.command {
        Commands::Init { path } => {
            tracing::debug!(%path, "initializing project");
            let project = Project::init(&path)?;
            tracing::debug!(dir = %project.crew_dir().display(), "created project directory");
            output.success(&format!("Initialized crew project at {}", project.root().display()));
        }

        Commands::Status => query::status(&output)?,
        Commands::Worker(cmd) => worker::run(cmd, &output)?,
        Commands::Chief(cmd) => chief::run(cmd, &output)?,
        Commands::Avail(cmd) => avail::run(cmd, &output)?,
        Commands::Task(cmd) => task::run(cmd, &output)?,
        Commands::Match => query::run_match(&output)?,
        Commands::Assign(cmd) => assign::run(cmd, &output)?,
    }

    tracing::debug!("command completed");
    Ok(())
}
