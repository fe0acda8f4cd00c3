//! Project management
//!
//! Handles project initialization and provides access to the store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::PROJECT_DIR;
use super::{Config, Store};
use crate::domain::Matcher;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a crew project. Run 'crew init' first.")]
    NotInProject,
}

/// A crew project: a directory holding `.crew/`
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let crew_dir = root.join(PROJECT_DIR);

        if !crew_dir.is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let crew_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(&crew_dir).with_context(|| {
            format!("Failed to create {} directory: {}", PROJECT_DIR, crew_dir.display())
        })?;

        let config_path = crew_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# crew configuration

[matching]
# Candidates kept per task
max_candidates = 3

[storage]
# Database file inside .crew/
database = "crew.db"
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let gitignore_path = crew_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# Record database and its WAL files
*.db
*.db-shm
*.db-wal
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        let project = Self::open(root)?;
        // Creates the database and schema up front
        project.store()?;

        Ok(project)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .crew directory path
    pub fn crew_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Opens the record store
    pub fn store(&self) -> Result<Store> {
        let path = self.config.database_path()?;
        Store::open(&path).with_context(|| format!("Failed to open database: {}", path.display()))
    }

    /// Builds a matcher from the project configuration
    pub fn matcher(&self) -> Matcher {
        Matcher::new().with_max_candidates(self.config.project.matching.max_candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.crew_dir().is_dir());
        assert!(project.crew_dir().join("config.toml").is_file());
        assert!(project.crew_dir().join(".gitignore").is_file());
        assert!(project.crew_dir().join("crew.db").is_file());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();

        Project::init(dir.path()).unwrap();
        Project::init(dir.path()).unwrap(); // Should not fail

        assert!(dir.path().join(".crew").is_dir());
    }

    #[test]
    fn default_config_is_loaded() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert_eq!(project.config().project.matching.max_candidates, 3);
        assert_eq!(project.matcher().max_candidates(), 3);
    }

    #[test]
    fn matcher_follows_config() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();
        fs::write(
            dir.path().join(".crew").join("config.toml"),
            "[matching]\nmax_candidates = 5\n",
        )
        .unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.matcher().max_candidates(), 5);
    }

    #[test]
    fn open_existing_project() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.root(), dir.path());
    }

    #[test]
    fn open_non_project_fails() {
        let dir = TempDir::new().unwrap();
        let result = Project::open(dir.path());

        assert!(result.is_err());
    }

    #[test]
    fn store_is_shared_across_opens() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        let mut store = project.store().unwrap();
        store
            .create_chief(crate::storage::NewChief {
                name: "Dana".to_string(),
                ..Default::default()
            })
            .unwrap();

        let reopened = Project::open(dir.path()).unwrap().store().unwrap();
        assert_eq!(reopened.chiefs().unwrap().len(), 1);
    }
}
