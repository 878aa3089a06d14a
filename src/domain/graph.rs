//! Dependency graph for tasks
//!
//! A read-only view over a [`Project`]: one node per task, one edge per
//! relationship (influencer -> dependent, weighted by the gap). Built on
//! demand with petgraph and used to derive every task's start day.

use std::collections::HashMap;

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::id::TaskId;
use super::project::{Day, Project};

/// A dependency graph for tasks
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph, edges weighted by days gap
    graph: DiGraph<TaskId, i32>,

    /// Map from TaskId to node index
    node_map: HashMap<TaskId, NodeIndex>,

    /// Duration of every node, used when walking edges
    days: HashMap<TaskId, u32>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph of a project
    ///
    /// Durations come from the task set. A relationship end that is not in
    /// the task set still gets a node, timed by its snapshot.
    pub fn from_project(project: &Project) -> Self {
        let mut graph = Self::new();

        for task in project.tasks() {
            graph.add_node(task.id, task.days);
        }

        for rel in project.relationships() {
            let from = graph.add_node(rel.influencer_id(), rel.influencer.days);
            let to = graph.add_node(rel.dependent_id(), rel.dependent.days);
            graph.graph.add_edge(from, to, rel.days_gap);
        }

        graph
    }

    fn add_node(&mut self, task_id: TaskId, days: u32) -> NodeIndex {
        if let Some(idx) = self.node_map.get(&task_id) {
            return *idx;
        }
        let idx = self.graph.add_node(task_id);
        self.node_map.insert(task_id, idx);
        self.days.insert(task_id, days);
        idx
    }

    /// Returns true if the graph has no directed cycle
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    /// Computes the start day of every task
    ///
    /// A task with incoming edges starts at the latest of
    /// `start(influencer) + influencer.days + gap` over those edges, clamped
    /// at day 0. A task without incoming edges starts at its registered day,
    /// or day 0 if it was never registered.
    pub fn start_days(&self, project: &Project) -> HashMap<TaskId, Day> {
        let order: Vec<NodeIndex> = match toposort(&self.graph, None) {
            Ok(order) => order,
            Err(cycle) => {
                tracing::warn!(
                    task = %self.graph[cycle.node_id()],
                    "dependency cycle found, start days along it are partial"
                );
                self.graph.node_indices().collect()
            }
        };

        let registry = project.independent_tasks();
        let mut starts: HashMap<NodeIndex, i64> = HashMap::with_capacity(order.len());

        for idx in order {
            let task_id = self.graph[idx];
            let mut derived: Option<i64> = None;

            for edge in self.graph.edges_directed(idx, Direction::Incoming) {
                // Unresolved only when the edge closes a cycle
                let Some(influencer_start) = starts.get(&edge.source()) else {
                    continue;
                };
                let influencer_days = self
                    .days
                    .get(&self.graph[edge.source()])
                    .copied()
                    .unwrap_or_default();
                let candidate =
                    influencer_start + i64::from(influencer_days) + i64::from(*edge.weight());
                derived = Some(derived.map_or(candidate, |d| d.max(candidate)));
            }

            let start = match derived {
                Some(day) => day.max(0),
                None => registry.day_of(task_id).map(i64::from).unwrap_or(0),
            };
            starts.insert(idx, start);
        }

        starts
            .into_iter()
            .map(|(idx, start)| (self.graph[idx], Day::try_from(start).unwrap_or(Day::MAX)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::RelationshipId;
    use crate::domain::relationship::Relationship;
    use crate::domain::task::Task;
    use chrono::NaiveDate;

    fn task(id: u64, days: u32) -> Task {
        Task::new(TaskId::new(id), format!("Task {}", id), days)
    }

    fn project() -> Project {
        Project::new(1, "Test", NaiveDate::from_ymd_opt(2022, 5, 1).unwrap())
    }

    fn link(project: &mut Project, id: u64, from: &Task, to: &Task, gap: i32) {
        project.insert_relationship(Relationship::new(
            RelationshipId::new(id),
            from.clone(),
            to.clone(),
            gap,
        ));
    }

    #[test]
    fn empty_graph() {
        let p = project();
        let graph = DependencyGraph::from_project(&p);
        assert!(graph.is_acyclic());
        assert!(graph.start_days(&p).is_empty());
    }

    #[test]
    fn chain_is_acyclic() {
        let mut p = project();
        let (t1, t2, t3) = (task(1, 1), task(2, 1), task(3, 1));
        for t in [&t3, &t2, &t1] {
            p.insert_task(t.clone());
        }
        link(&mut p, 1, &t1, &t2, 0);
        link(&mut p, 2, &t2, &t3, 0);

        let graph = DependencyGraph::from_project(&p);
        assert!(graph.is_acyclic());

        // Task-set order is reversed, start days still follow the edges
        let starts = graph.start_days(&p);
        assert_eq!((starts[&t1.id], starts[&t2.id], starts[&t3.id]), (0, 1, 2));
    }

    #[test]
    fn cycle_is_reported() {
        let mut p = project();
        let (t1, t2) = (task(1, 1), task(2, 1));
        p.insert_task(t1.clone());
        p.insert_task(t2.clone());
        link(&mut p, 1, &t1, &t2, 0);
        link(&mut p, 2, &t2, &t1, 0);

        let graph = DependencyGraph::from_project(&p);
        assert!(!graph.is_acyclic());

        // Still terminates and yields a day for every task
        assert_eq!(graph.start_days(&p).len(), 2);
    }

    #[test]
    fn chain_with_gaps() {
        let mut p = project();
        let (t1, t2, t3) = (task(1, 7), task(2, 7), task(3, 7));
        for t in [&t1, &t2, &t3] {
            p.insert_task(t.clone());
        }
        p.independent_tasks_mut().insert(0, t1.id);
        link(&mut p, 1, &t1, &t2, 2);
        link(&mut p, 2, &t2, &t3, -2);

        let starts = DependencyGraph::from_project(&p).start_days(&p);
        assert_eq!(starts[&t1.id], 0);
        assert_eq!(starts[&t2.id], 9);
        assert_eq!(starts[&t3.id], 14);
    }

    #[test]
    fn latest_influencer_wins() {
        let mut p = project();
        let (t1, t2, t3) = (task(1, 2), task(2, 10), task(3, 1));
        for t in [&t1, &t2, &t3] {
            p.insert_task(t.clone());
        }
        p.independent_tasks_mut().insert(0, t1.id);
        p.independent_tasks_mut().insert(1, t2.id);
        link(&mut p, 1, &t1, &t3, 0);
        link(&mut p, 2, &t2, &t3, 0);

        let starts = DependencyGraph::from_project(&p).start_days(&p);
        assert_eq!(starts[&t3.id], 11);
    }

    #[test]
    fn negative_gap_clamps_at_zero() {
        let mut p = project();
        let (t1, t2) = (task(1, 1), task(2, 1));
        p.insert_task(t1.clone());
        p.insert_task(t2.clone());
        p.independent_tasks_mut().insert(0, t1.id);
        link(&mut p, 1, &t1, &t2, -5);

        let starts = DependencyGraph::from_project(&p).start_days(&p);
        assert_eq!(starts[&t2.id], 0);
    }

    #[test]
    fn durations_come_from_task_set() {
        let mut p = project();
        let stale = task(1, 1);
        let current = task(1, 20);
        let t2 = task(2, 1);
        p.insert_task(current);
        p.insert_task(t2.clone());
        link(&mut p, 1, &stale, &t2, 0);

        let starts = DependencyGraph::from_project(&p).start_days(&p);
        assert_eq!(starts[&t2.id], 20);
    }

    #[test]
    fn unregistered_root_starts_at_zero() {
        let mut p = project();
        p.insert_task(task(1, 3));

        let starts = DependencyGraph::from_project(&p).start_days(&p);
        assert_eq!(starts[&TaskId::new(1)], 0);
    }

    #[test]
    fn performance_500_tasks() {
        use std::time::Instant;

        let mut p = project();
        let tasks: Vec<_> = (1..=500).map(|i| task(i, 1)).collect();
        for t in &tasks {
            p.insert_task(t.clone());
        }
        p.independent_tasks_mut().insert(0, tasks[0].id);
        for i in 1..500 {
            link(&mut p, i as u64, &tasks[i - 1], &tasks[i], 0);
        }

        let start = Instant::now();
        let starts = DependencyGraph::from_project(&p).start_days(&p);
        let duration = start.elapsed();

        assert_eq!(starts[&tasks[499].id], 499);
        assert!(duration.as_millis() < 100, "Start days took {:?}", duration);
    }
}
