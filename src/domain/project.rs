//! Project aggregate
//!
//! Holds the task set, the relationship set and the registry of independent
//! tasks. The aggregate has no rules of its own: every mutator is
//! crate-private and only the [`Planner`](super::Planner) calls them, after
//! validation has passed.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::{RelationshipId, TaskId};
use super::relationship::Relationship;
use super::task::Task;

/// Offset in days from project start
pub type Day = u32;

/// Start days of tasks that have no incoming relationship
///
/// Buckets keep insertion order. A task id lives in at most one bucket and
/// empty buckets are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndependentTasks(BTreeMap<Day, Vec<TaskId>>);

impl IndependentTasks {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Registers a task at a start day, moving it if already registered
    pub(crate) fn insert(&mut self, day: Day, task_id: TaskId) {
        self.remove(task_id);
        self.0.entry(day).or_default().push(task_id);
    }

    /// Removes a task from whichever bucket holds it, returning that day
    pub(crate) fn remove(&mut self, task_id: TaskId) -> Option<Day> {
        let day = self.day_of(task_id)?;
        if let Some(bucket) = self.0.get_mut(&day) {
            bucket.retain(|id| *id != task_id);
            if bucket.is_empty() {
                self.0.remove(&day);
            }
        }
        Some(day)
    }

    /// Returns the registered start day of a task
    pub fn day_of(&self, task_id: TaskId) -> Option<Day> {
        self.0
            .iter()
            .find(|(_, ids)| ids.contains(&task_id))
            .map(|(day, _)| *day)
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        self.day_of(task_id).is_some()
    }

    /// Tasks registered at a given day, in insertion order
    pub fn at(&self, day: Day) -> &[TaskId] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over `(day, task id)` pairs in day order
    pub fn iter(&self) -> impl Iterator<Item = (Day, TaskId)> + '_ {
        self.0
            .iter()
            .flat_map(|(day, ids)| ids.iter().map(move |id| (*day, *id)))
    }

    /// Iterates over the non-empty buckets
    pub fn buckets(&self) -> impl Iterator<Item = (Day, &[TaskId])> + '_ {
        self.0.iter().map(|(day, ids)| (*day, ids.as_slice()))
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A plan: tasks, the edges between them, and where independent tasks start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: u64,
    name: String,

    /// Calendar anchor for day 0. Never used in offset arithmetic.
    start_date: NaiveDate,

    #[serde(default)]
    tasks: Vec<Task>,

    #[serde(default)]
    relationships: Vec<Relationship>,

    #[serde(default)]
    independent_tasks: IndependentTasks,
}

impl Project {
    /// Creates an empty project
    pub fn new(id: u64, name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            start_date,
            tasks: Vec::new(),
            relationships: Vec::new(),
            independent_tasks: IndependentTasks::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Relationships in insertion order
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn independent_tasks(&self) -> &IndependentTasks {
        &self.independent_tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Returns true if this project has no tasks and no relationships
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.relationships.is_empty()
    }

    /// Returns an empty project carrying the same metadata
    pub(crate) fn emptied(&self) -> Self {
        Self::new(self.id, self.name.clone(), self.start_date)
    }

    pub(crate) fn insert_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub(crate) fn insert_task_at(&mut self, index: usize, task: Task) {
        let index = index.min(self.tasks.len());
        self.tasks.insert(index, task);
    }

    /// Removes a task by id, returning its former position and value
    pub(crate) fn remove_task(&mut self, id: TaskId) -> Option<(usize, Task)> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some((index, self.tasks.remove(index)))
    }

    pub(crate) fn insert_relationship(&mut self, relationship: Relationship) {
        self.relationships.push(relationship);
    }

    pub(crate) fn insert_relationship_at(&mut self, index: usize, relationship: Relationship) {
        let index = index.min(self.relationships.len());
        self.relationships.insert(index, relationship);
    }

    pub(crate) fn remove_relationship(&mut self, id: RelationshipId) -> Option<Relationship> {
        let index = self.relationships.iter().position(|r| r.id == id)?;
        Some(self.relationships.remove(index))
    }

    pub(crate) fn independent_tasks_mut(&mut self) -> &mut IndependentTasks {
        &mut self.independent_tasks
    }
}
