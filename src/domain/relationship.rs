//! Dependency edges between tasks
//!
//! A relationship `influencer -> dependent` says the dependent starts
//! `days_gap` days after the influencer ends. Negative gaps overlap the two.
//! Both ends are snapshots of the task values taken when the edge was made;
//! the planner resolves them by id, so a stale snapshot never changes timing.

use serde::{Deserialize, Serialize};

use super::id::{RelationshipId, TaskId};
use super::task::Task;

/// A directed, gap-adjusted dependency edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,

    /// Task whose end anchors the dependent
    pub influencer: Task,

    /// Task whose start is derived from the influencer
    pub dependent: Task,

    /// Days between the influencer's end and the dependent's start
    #[serde(default)]
    pub days_gap: i32,
}

impl Relationship {
    pub fn new(id: RelationshipId, influencer: Task, dependent: Task, days_gap: i32) -> Self {
        Self {
            id,
            influencer,
            dependent,
            days_gap,
        }
    }

    pub fn influencer_id(&self) -> TaskId {
        self.influencer.id
    }

    pub fn dependent_id(&self) -> TaskId {
        self.dependent.id
    }

    /// Returns true if the task is either end of this edge
    pub fn touches(&self, task_id: TaskId) -> bool {
        self.influencer.id == task_id || self.dependent.id == task_id
    }

    /// Returns a copy with every end matching `task.id` replaced by `task`
    pub fn rebind(&self, task: &Task) -> Self {
        let mut rebound = self.clone();
        if rebound.influencer.id == task.id {
            rebound.influencer = task.clone();
        }
        if rebound.dependent.id == task.id {
            rebound.dependent = task.clone();
        }
        rebound
    }
}
