//! Gantt CLI - A local-first project planner
//!
//! A project is a set of tasks with durations, linked by gap-adjusted
//! dependencies. The planner keeps the dependency graph valid (no cycles,
//! no redundant edges) and derives the day every task starts.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{PlanError, Planner, Project, Relationship, RelationshipId, Task, TaskId};
