//! Workspace management
//!
//! A workspace is a directory holding a `.gantt/` folder. It handles
//! initialization and hands out the project store and configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use thiserror::Error;

use super::config::{Config, PROJECT_DIR};
use super::store::ProjectStore;
use crate::domain::Planner;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Not in a gantt project. Run 'gantt init' first.")]
    NotInProject,

    #[error("Project file missing: {0}")]
    MissingProjectFile(PathBuf),
}

/// A gantt workspace on disk
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens an existing workspace at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(WorkspaceError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the workspace at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(WorkspaceError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a workspace, creating an empty project if none exists
    pub fn init(root: impl Into<PathBuf>, name: &str, start_date: NaiveDate) -> Result<Self> {
        let root = root.into();
        let gantt_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(&gantt_dir).with_context(|| {
            format!("Failed to create {} directory: {}", PROJECT_DIR, gantt_dir.display())
        })?;

        // Create default config
        let config_path = gantt_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Gantt CLI configuration

# Duration used by 'gantt task add' when --days is omitted
default_days = 1

# Color used by 'gantt task add' when --color is omitted
default_color = "red"

# Gap used by 'gantt link add' when --gap is omitted
default_gap = 0
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let store = ProjectStore::for_project(&root);
        if !store.exists() {
            store.save(&Planner::new(1, name, start_date))?;
        }

        Self::open(root)
    }

    /// Returns the workspace root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .gantt directory path
    pub fn gantt_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the project store
    pub fn store(&self) -> ProjectStore {
        ProjectStore::for_project(&self.root)
    }

    /// Loads the planner for this workspace
    pub fn load_planner(&self) -> Result<Planner> {
        let store = self.store();
        if !store.exists() {
            return Err(WorkspaceError::MissingProjectFile(store.path().to_path_buf()).into());
        }
        store.load()
    }

    /// Persists the planner for this workspace
    pub fn save_planner(&self, planner: &Planner) -> Result<()> {
        self.store().save(planner)
    }
}
