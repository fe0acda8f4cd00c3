//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project management | `init`, `status` |
//! | Records | People and their time | `worker add`, `chief add`, `avail add` |
//! | Tasks | Task proposals | `task add`, `task list`, `task propose` |
//! | Matching | Ranked candidates | `match` |
//! | Assignments | Committing workers | `assign confirm`, `assign cancel` |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! `--verbose` (or `-v`) enables debug logs on stderr. `CREW_LOG` takes a
//! full `tracing` filter, e.g. `CREW_LOG=crew_match=trace`.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod assign;
mod avail;
mod chief;
mod output;
mod query;
mod task;
mod worker;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
