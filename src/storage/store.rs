//! JSON storage for the project
//!
//! The whole project lives in `.gantt/project.json`. Reads take a shared
//! lock; writes go to a locked temp file that is renamed over the original.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::config::PROJECT_DIR;
use crate::domain::{Planner, Project};

/// Store for a project snapshot in JSON format
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    /// Creates a new store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(PROJECT_DIR).join("project.json"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if a snapshot has been written
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the raw snapshot, without checking any planning rule
    pub fn read(&self) -> Result<Project> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open project store: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on project store")?;

        let reader = BufReader::new(&file);
        let project: Project = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse project: {}", self.path.display()))?;

        // Lock is released when file is dropped
        Ok(project)
    }

    /// Reads the snapshot and rebuilds a planner from it
    pub fn load(&self) -> Result<Planner> {
        let project = self.read()?;
        Planner::restore(project)
            .with_context(|| format!("Project file is inconsistent: {}", self.path.display()))
    }

    /// Writes the snapshot (full rewrite)
    pub fn write(&self, project: &Project) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Acquire exclusive lock
            file.lock_exclusive()
                .context("Failed to acquire write lock on project store")?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, project)
                .context("Failed to serialize project")?;
            writeln!(writer).context("Failed to write project")?;
            writer.flush().context("Failed to flush project store")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Writes the planner's current project
    pub fn save(&self, planner: &Planner) -> Result<()> {
        self.write(planner.project())
    }
}
