//! Admission checks over a project snapshot
//!
//! Pure predicates: nothing here mutates the project. The graph walks follow
//! edges backwards (from a dependent to its influencers) with an explicit
//! stack and a visited set, so they terminate even on a graph that somehow
//! lost its acyclicity.

use std::collections::HashSet;

use super::error::PlanError;
use super::id::TaskId;
use super::project::Project;
use super::relationship::Relationship;
use super::task::Task;

/// Returns true if a task with this id is in the project
pub fn task_exists(project: &Project, id: TaskId) -> bool {
    project.task(id).is_some()
}

/// Returns the ids, in the given order, that are not in the project
pub fn missing_tasks(project: &Project, ids: &[TaskId]) -> Vec<TaskId> {
    let mut missing = Vec::new();
    for id in ids {
        if !task_exists(project, *id) && !missing.contains(id) {
            missing.push(*id);
        }
    }
    missing
}

/// Returns true if `task` depends on `ancestor` through one or more edges
pub fn transitively_depends_on(
    relationships: &[Relationship],
    task: TaskId,
    ancestor: TaskId,
) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![task];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }

        for rel in relationships.iter().filter(|r| r.dependent_id() == current) {
            let influencer = rel.influencer_id();
            if influencer == ancestor {
                return true;
            }
            if !visited.contains(&influencer) {
                stack.push(influencer);
            }
        }
    }

    false
}

/// Would an edge `influencer -> dependent` close a cycle?
///
/// True when the influencer already depends on the dependent, or when both
/// ends are the same task.
pub fn creates_cycle(relationships: &[Relationship], influencer: TaskId, dependent: TaskId) -> bool {
    influencer == dependent || transitively_depends_on(relationships, influencer, dependent)
}

/// Would an edge `influencer -> dependent` duplicate an existing path?
pub fn is_redundant(relationships: &[Relationship], influencer: TaskId, dependent: TaskId) -> bool {
    transitively_depends_on(relationships, dependent, influencer)
}

fn check_task_value(project: &Project, task: &Task) -> Result<(), PlanError> {
    if project.tasks().contains(task) {
        return Err(PlanError::TaskAlreadyExists);
    }
    Ok(())
}

fn check_days(task: &Task) -> Result<(), PlanError> {
    if task.days == 0 {
        return Err(PlanError::DaysMustBePositive);
    }
    Ok(())
}

/// Checks that a new task may be added
pub fn check_new_task(project: &Project, task: &Task) -> Result<(), PlanError> {
    check_task_value(project, task)?;
    if task_exists(project, task.id) {
        return Err(PlanError::TaskIdRepeated);
    }
    check_days(task)
}

/// Checks that a task may replace the existing task with the same id
pub fn check_replacement(project: &Project, task: &Task) -> Result<(), PlanError> {
    if !task_exists(project, task.id) {
        return Err(PlanError::UnexistingTasks(vec![task.id]));
    }
    check_task_value(project, task)?;
    check_days(task)
}

/// Checks that a relationship may be added
pub fn check_new_relationship(project: &Project, relationship: &Relationship) -> Result<(), PlanError> {
    if project.relationships().contains(relationship) {
        return Err(PlanError::RelationshipAlreadyExists);
    }
    if project.relationship(relationship.id).is_some() {
        return Err(PlanError::RelationshipIdRepeated);
    }

    let influencer = relationship.influencer_id();
    let dependent = relationship.dependent_id();

    let missing = missing_tasks(project, &[influencer, dependent]);
    if !missing.is_empty() {
        return Err(PlanError::UnexistingTasks(missing));
    }

    if creates_cycle(project.relationships(), influencer, dependent) {
        return Err(PlanError::CycleReference);
    }
    if is_redundant(project.relationships(), influencer, dependent) {
        return Err(PlanError::TaskAlreadyDependsOnInfluencerIndirectly);
    }

    Ok(())
}
