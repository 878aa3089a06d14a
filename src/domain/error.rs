//! Errors raised by planner commands
//!
//! Every variant is recoverable: a command that fails leaves the project
//! exactly as it was.

use thiserror::Error;

use super::id::{RelationshipId, TaskId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Task already exists")]
    TaskAlreadyExists,

    #[error("Another task already uses this id")]
    TaskIdRepeated,

    #[error("Task duration must be at least one day")]
    DaysMustBePositive,

    #[error("Tasks not found: {}", join_ids(.0))]
    UnexistingTasks(Vec<TaskId>),

    #[error("Relationship already exists")]
    RelationshipAlreadyExists,

    #[error("Another relationship already uses this id")]
    RelationshipIdRepeated,

    #[error("Relationship would create a dependency cycle")]
    CycleReference,

    #[error("Dependent task already depends on the influencer, directly or through other tasks")]
    TaskAlreadyDependsOnInfluencerIndirectly,

    #[error("Relationship not found: {0}")]
    UnexistingRelationship(RelationshipId),
}

fn join_ids(ids: &[TaskId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
