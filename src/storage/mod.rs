//! # Storage Layer
//!
//! Persistence for the planner CLI. The planning core knows nothing about
//! files; this layer snapshots a [`Project`](crate::domain::Project) to
//! disk and rebuilds a [`Planner`](crate::domain::Planner) from it.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Project | Pretty JSON | `.gantt/project.json` |
//! | Config | TOML | `.gantt/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`ProjectStore`] uses file locking (`fs2`) for concurrent access
//! - All writes are atomic (temp file + rename)
//! - Loading replays the snapshot through the planner's admission checks,
//!   so a hand-edited file that breaks a rule is rejected
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point for a directory holding `.gantt/`
//! - [`ProjectStore`] - Read/write the project snapshot
//! - [`Config`] - Project and global configuration

mod config;
mod store;
mod workspace;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, PROJECT_DIR};
pub use store::ProjectStore;
pub use workspace::{Workspace, WorkspaceError};
