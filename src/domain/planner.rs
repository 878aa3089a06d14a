//! The planning engine
//!
//! [`Planner`] owns one [`Project`] and is the only thing allowed to change
//! it. Every command validates first and mutates after, so a failed command
//! leaves the project untouched.
//!
//! Besides the task and relationship sets, the planner keeps the registry of
//! independent tasks in step with the graph: a task is registered (at its
//! start day) exactly when no relationship points at it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use super::error::PlanError;
use super::graph::DependencyGraph;
use super::id::{RelationshipId, TaskId};
use super::project::{Day, Project};
use super::relationship::Relationship;
use super::task::Task;
use super::validation;

/// Tasks grouped by the day they start
pub type Schedule = BTreeMap<Day, Vec<Task>>;

/// Scheduling engine for a single project
#[derive(Debug, Clone)]
pub struct Planner {
    project: Project,
}

impl Planner {
    /// Creates a planner over a new, empty project
    pub fn new(id: u64, name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            project: Project::new(id, name, start_date),
        }
    }

    /// Rebuilds a planner from a project snapshot
    ///
    /// Every task and relationship goes through admission again, so a
    /// snapshot that breaks any rule is rejected with the first error found.
    /// Independent tasks keep their registered start day.
    pub fn restore(snapshot: Project) -> Result<Self, PlanError> {
        let mut planner = Self {
            project: snapshot.emptied(),
        };

        for task in snapshot.tasks() {
            let day = snapshot.independent_tasks().day_of(task.id).unwrap_or(0);
            planner.add_task(task.clone(), day)?;
        }

        for rel in snapshot.relationships() {
            planner.add_relationship(rel.clone())?;
        }

        Ok(planner)
    }

    /// Read access to the current project
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Consumes the planner, returning the project
    pub fn into_project(self) -> Project {
        self.project
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.project.task(id)
    }

    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.project.relationship(id)
    }

    /// Relationships pointing at a task
    pub fn incoming(&self, id: TaskId) -> Vec<&Relationship> {
        self.project
            .relationships()
            .iter()
            .filter(|r| r.dependent_id() == id)
            .collect()
    }

    /// Relationships leaving a task
    pub fn outgoing(&self, id: TaskId) -> Vec<&Relationship> {
        self.project
            .relationships()
            .iter()
            .filter(|r| r.influencer_id() == id)
            .collect()
    }

    /// Smallest task id greater than every id in use
    pub fn next_task_id(&self) -> TaskId {
        self.project
            .tasks()
            .iter()
            .map(|t| t.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(TaskId::new(1))
    }

    /// Smallest relationship id greater than every id in use
    pub fn next_relationship_id(&self) -> RelationshipId {
        self.project
            .relationships()
            .iter()
            .map(|r| r.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(RelationshipId::new(1))
    }

    /// Adds a task, registered as independent at `start_day`
    pub fn add_task(&mut self, task: Task, start_day: Day) -> Result<(), PlanError> {
        validation::check_new_task(&self.project, &task)?;

        debug!(task = %task.id, days = task.days, start_day, "adding task");
        let id = task.id;
        self.project.insert_task(task);
        self.project.independent_tasks_mut().insert(start_day, id);
        Ok(())
    }

    /// Removes a task and every relationship touching it
    ///
    /// Dependents of the removed task are re-homed: each one left without
    /// an incoming relationship becomes independent at the day it would
    /// have started, `start + days + gap`, clamped at day 0.
    pub fn remove_task(&mut self, id: TaskId) -> Result<Task, PlanError> {
        let start = self.start_day(id);
        let Some((_, task)) = self.project.remove_task(id) else {
            return Err(PlanError::UnexistingTasks(vec![id]));
        };
        let start = i64::from(start.unwrap_or(0));

        let (incoming, outgoing): (Vec<_>, Vec<_>) = self
            .project
            .relationships()
            .iter()
            .filter(|r| r.touches(id))
            .map(|r| (r.id, r.dependent_id() == id, r.days_gap))
            .partition(|(_, is_incoming, _)| *is_incoming);

        for (rel_id, _, _) in incoming {
            self.detach_relationship(rel_id, None);
        }

        for (rel_id, _, gap) in outgoing {
            let day = (start + i64::from(task.days) + i64::from(gap)).max(0);
            self.detach_relationship(rel_id, Some(Day::try_from(day).unwrap_or(Day::MAX)));
        }

        self.project.independent_tasks_mut().remove(id);

        debug!(task = %id, "removed task");
        Ok(task)
    }

    /// Replaces the task with the same id, returning the previous value
    ///
    /// The old task goes through the full removal cascade, then the new one
    /// takes its place: same position in the task set, same start day if it
    /// was independent, and every relationship that touched it is restored
    /// in place with the same id and gap, pointing at the new value.
    pub fn edit_task(&mut self, task: Task) -> Result<Task, PlanError> {
        validation::check_replacement(&self.project, &task)?;

        let id = task.id;
        let registered_day = self.project.independent_tasks().day_of(id);
        let position = self.project.tasks().iter().position(|t| t.id == id);
        let touching: Vec<(usize, Relationship)> = self
            .project
            .relationships()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.touches(id))
            .map(|(index, r)| (index, r.clone()))
            .collect();

        let previous = self.remove_task(id)?;

        match position {
            Some(index) => self.project.insert_task_at(index, task.clone()),
            None => self.project.insert_task(task.clone()),
        }

        if let Some(day) = registered_day {
            self.project.independent_tasks_mut().insert(day, id);
        }

        // Same graph as before the edit, so no fresh admission. Ascending
        // indices put every edge back at its old position.
        for (index, rel) in touching {
            let rebound = rel.rebind(&task);
            self.project
                .independent_tasks_mut()
                .remove(rebound.dependent_id());
            self.project.insert_relationship_at(index, rebound);
        }

        debug!(task = %id, days = task.days, "edited task");
        Ok(previous)
    }

    /// Adds a relationship; its dependent stops being independent
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<(), PlanError> {
        validation::check_new_relationship(&self.project, &relationship)?;

        debug!(
            relationship = %relationship.id,
            influencer = %relationship.influencer_id(),
            dependent = %relationship.dependent_id(),
            gap = relationship.days_gap,
            "adding relationship"
        );
        let dependent = relationship.dependent_id();
        self.project.insert_relationship(relationship);
        self.project.independent_tasks_mut().remove(dependent);
        Ok(())
    }

    /// Removes a relationship by id
    ///
    /// If the dependent is left with no incoming relationship it becomes
    /// independent at `dependent_start_day`, or at the day it currently
    /// starts when none is given, so a task is registered exactly when
    /// nothing points at it. A dependent that still has an influencer stays
    /// dependent and the day is ignored.
    pub fn remove_relationship(
        &mut self,
        id: RelationshipId,
        dependent_start_day: Option<Day>,
    ) -> Result<Relationship, PlanError> {
        let dependent = self
            .project
            .relationship(id)
            .map(Relationship::dependent_id)
            .ok_or(PlanError::UnexistingRelationship(id))?;

        let day = dependent_start_day.or_else(|| self.start_day(dependent));
        self.detach_relationship(id, day)
            .ok_or(PlanError::UnexistingRelationship(id))
    }

    /// Drops an edge, registering its dependent at `dependent_start_day`
    /// when given and the dependent has no incoming edge left
    fn detach_relationship(
        &mut self,
        id: RelationshipId,
        dependent_start_day: Option<Day>,
    ) -> Option<Relationship> {
        let removed = self.project.remove_relationship(id)?;
        let dependent = removed.dependent_id();

        if let Some(day) = dependent_start_day {
            let still_dependent = self
                .project
                .relationships()
                .iter()
                .any(|r| r.dependent_id() == dependent);

            if !still_dependent && validation::task_exists(&self.project, dependent) {
                self.project.independent_tasks_mut().insert(day, dependent);
            }
        }

        debug!(relationship = %id, dependent = %dependent, ?dependent_start_day, "removed relationship");
        Some(removed)
    }

    /// Returns true if the task is registered as independent
    pub fn is_independent(&self, id: TaskId) -> bool {
        self.project.independent_tasks().contains(id)
    }

    /// Effective start day of one task
    pub fn start_day(&self, id: TaskId) -> Option<Day> {
        self.project.task(id)?;
        DependencyGraph::from_project(&self.project)
            .start_days(&self.project)
            .get(&id)
            .copied()
    }

    /// Every task grouped by its effective start day
    ///
    /// Day 0 is always present, possibly empty. Within a day, tasks keep
    /// the order of the task set.
    pub fn tasks_sorted_by_days(&self) -> Schedule {
        let starts = DependencyGraph::from_project(&self.project).start_days(&self.project);

        let mut schedule = Schedule::new();
        schedule.insert(0, Vec::new());

        for task in self.project.tasks() {
            let day = starts.get(&task.id).copied().unwrap_or(0);
            schedule.entry(day).or_default().push(task.clone());
        }

        schedule
    }

    /// First day after every task has finished
    pub fn end_day(&self) -> Day {
        self.tasks_sorted_by_days()
            .into_iter()
            .flat_map(|(day, tasks)| tasks.into_iter().map(move |t| day.saturating_add(t.days)))
            .max()
            .unwrap_or(0)
    }
}
