//! Relationship CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::{Relationship, RelationshipId, Task, TaskId};
use crate::storage::Workspace;

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Make DEPENDENT start GAP days after INFLUENCER ends
    ///
    /// Examples:
    ///   gantt link add 1 2              # t-2 starts when t-1 ends
    ///   gantt link add 1 3 --gap -2     # t-3 overlaps the last 2 days of t-1
    Add {
        /// Task that must finish first
        influencer: TaskId,

        /// Task whose start follows the influencer
        dependent: TaskId,

        /// Days between the influencer's end and the dependent's start
        #[arg(long, short, allow_hyphen_values = true)]
        gap: Option<i32>,

        /// Explicit relationship ID (defaults to the next free one)
        #[arg(long)]
        id: Option<RelationshipId>,
    },

    /// Remove a relationship
    Remove {
        /// Relationship ID
        id: RelationshipId,

        /// Day the dependent starts at if it becomes independent
        /// (defaults to where it currently starts)
        #[arg(long)]
        start_day: Option<u32>,
    },

    /// List relationships
    List,
}

pub fn run(cmd: LinkCommands, output: &Output) -> Result<()> {
    match cmd {
        LinkCommands::Add {
            influencer,
            dependent,
            gap,
            id,
        } => add_link(output, influencer, dependent, gap, id),
        LinkCommands::Remove { id, start_day } => remove_link(output, id, start_day),
        LinkCommands::List => list_links(output),
    }
}

fn add_link(
    output: &Output,
    influencer: TaskId,
    dependent: TaskId,
    gap: Option<i32>,
    id: Option<RelationshipId>,
) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let mut planner = workspace.load_planner()?;

    // Ends not in the project get a placeholder; admission reports them
    let snapshot = |task_id: TaskId| {
        planner
            .task(task_id)
            .cloned()
            .unwrap_or_else(|| Task::new(task_id, "", 1))
    };
    let relationship = Relationship::new(
        id.unwrap_or_else(|| planner.next_relationship_id()),
        snapshot(influencer),
        snapshot(dependent),
        gap.unwrap_or(workspace.config().project.default_gap),
    );

    output.verbose_ctx(
        "link",
        &format!("Adding {}: {} -> {} gap {}", relationship.id, influencer, dependent, relationship.days_gap),
    );
    planner
        .add_relationship(relationship.clone())
        .with_context(|| format!("Cannot link {} -> {}", influencer, dependent))?;
    workspace.save_planner(&planner)?;

    let start = planner.start_day(dependent).unwrap_or_default();
    if output.is_json() {
        output.data(&serde_json::json!({
            "id": relationship.id,
            "influencer": influencer,
            "dependent": dependent,
            "gap": relationship.days_gap,
            "dependent_start": start,
        }))?;
    } else {
        output.success(&format!(
            "Linked {} -> {} ({}); {} now starts at day {}",
            influencer, dependent, relationship.id, dependent, start
        ));
    }

    Ok(())
}

fn remove_link(output: &Output, id: RelationshipId, start_day: Option<u32>) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let mut planner = workspace.load_planner()?;

    let removed = planner
        .remove_relationship(id, start_day)
        .with_context(|| format!("Cannot remove relationship {}", id))?;
    workspace.save_planner(&planner)?;

    let dependent = removed.dependent_id();
    output.verbose_ctx(
        "link",
        &format!(
            "{} independent: {}",
            dependent,
            planner.is_independent(dependent)
        ),
    );
    output.success(&format!(
        "Removed relationship {}: {} -> {}",
        removed.id,
        removed.influencer_id(),
        dependent
    ));

    Ok(())
}

fn list_links(output: &Output) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let planner = workspace.load_planner()?;
    let relationships = planner.project().relationships();

    if output.is_json() {
        let items: Vec<_> = relationships
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id,
                    "influencer": r.influencer_id(),
                    "dependent": r.dependent_id(),
                    "gap": r.days_gap,
                })
            })
            .collect();
        output.data(&items)?;
        return Ok(());
    }

    if relationships.is_empty() {
        println!("No relationships found.");
        return Ok(());
    }

    println!("{:<8} {:<10} {:<10} {:>5}", "ID", "AFTER", "TASK", "GAP");
    println!("{}", "-".repeat(36));
    for rel in relationships {
        println!(
            "{:<8} {:<10} {:<10} {:>5}",
            rel.id.to_string(),
            rel.influencer_id().to_string(),
            rel.dependent_id().to_string(),
            rel.days_gap
        );
    }

    Ok(())
}
