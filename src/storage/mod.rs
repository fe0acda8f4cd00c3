//! # Storage Layer
//!
//! Persistence layer for crew.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Records | SQLite | `.crew/crew.db` |
//! | Config | TOML | `.crew/config.toml` |
//!
//! ## Project Structure
//!
//! ```text
//! .crew/
//! ├── crew.db        # Workers, chiefs, availability, tasks, assignments
//! ├── config.toml    # Project configuration
//! └── .gitignore     # Ignores the database
//! ```
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a crew project
//! - [`Store`] - Explicit handle to the record database
//! - [`Config`] - Project and global configuration
//!
//! The matcher never reads the store itself: callers take a
//! [`Store::snapshot`] and hand the plain records over.

mod config;
mod project;
mod store;

pub use config::{
    Config, ConfigError, GlobalConfig, MatchingConfig, OutputFormat, ProjectConfig, StorageConfig,
    PROJECT_DIR,
};
pub use project::{Project, ProjectError};
pub use store::{
    NewAssignment, NewChief, NewPeriod, NewTask, NewWorker, Store, StoreCounts, StoreError,
    WorkerRemoval,
};
