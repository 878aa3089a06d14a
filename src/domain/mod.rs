//! Domain models for the planner
//!
//! Contains the core scheduling logic without any I/O concerns.

mod id;
mod task;
mod relationship;
mod project;
mod error;
mod graph;
pub mod validation;
mod planner;

pub use id::{IdError, RelationshipId, TaskId};
pub use task::{Palette, Task};
pub use relationship::Relationship;
pub use project::{Day, IndependentTasks, Project};
pub use error::PlanError;
pub use graph::DependencyGraph;
pub use planner::{Planner, Schedule};
