//! Task CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::{Palette, Planner, Task, TaskId};
use crate::storage::Workspace;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task, starting independently at a given day
    ///
    /// Examples:
    ///   gantt task add "Plot cleaning" --days 7
    ///   gantt task add "Fencing" --days 3 --start 10 --color green
    Add {
        /// Task name
        name: String,

        /// Duration in days (defaults to the project's default_days)
        #[arg(long, short)]
        days: Option<u32>,

        /// Start day, counted from project start
        #[arg(long, short, default_value = "0")]
        start: u32,

        /// Display color
        #[arg(long, short)]
        color: Option<Palette>,

        /// Explicit task ID (defaults to the next free one)
        #[arg(long)]
        id: Option<TaskId>,
    },

    /// Replace a task's name, duration or color, keeping its relationships
    Edit {
        /// Task ID
        id: TaskId,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New duration in days
        #[arg(long, short)]
        days: Option<u32>,

        /// New color
        #[arg(long, short)]
        color: Option<Palette>,
    },

    /// Remove a task and its relationships
    Remove {
        /// Task ID
        id: TaskId,
    },

    /// List tasks
    List,

    /// Show task details
    Show {
        /// Task ID
        id: TaskId,
    },
}

pub fn run(cmd: TaskCommands, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add {
            name,
            days,
            start,
            color,
            id,
        } => add_task(output, name, days, start, color, id),
        TaskCommands::Edit {
            id,
            name,
            days,
            color,
        } => edit_task(output, id, name, days, color),
        TaskCommands::Remove { id } => remove_task(output, id),
        TaskCommands::List => list_tasks(output),
        TaskCommands::Show { id } => show_task(output, id),
    }
}

fn add_task(
    output: &Output,
    name: String,
    days: Option<u32>,
    start: u32,
    color: Option<Palette>,
    id: Option<TaskId>,
) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let defaults = &workspace.config().project;
    let mut planner = workspace.load_planner()?;

    let id = id.unwrap_or_else(|| planner.next_task_id());
    let task = Task::new(id, name, days.unwrap_or(defaults.default_days))
        .with_color(color.unwrap_or(defaults.default_color));

    output.verbose_ctx("task", &format!("Adding {} ({} days) at day {}", task.id, task.days, start));
    planner
        .add_task(task.clone(), start)
        .with_context(|| format!("Cannot add task '{}'", task.name))?;
    workspace.save_planner(&planner)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id,
            "name": task.name,
            "days": task.days,
            "color": task.color,
            "start": start,
        }))?;
    } else {
        output.success(&format!("Added task {}: {}", task.id, task.name));
    }

    Ok(())
}

fn edit_task(
    output: &Output,
    id: TaskId,
    name: Option<String>,
    days: Option<u32>,
    color: Option<Palette>,
) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let mut planner = workspace.load_planner()?;

    let current = planner
        .task(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;

    let mut modified = current;
    if let Some(name) = name {
        modified = modified.with_name(name);
    }
    if let Some(days) = days {
        modified = modified.with_days(days);
    }
    if let Some(color) = color {
        modified = modified.with_color(color);
    }

    output.verbose_ctx("task", &format!("Editing {}", id));
    planner
        .edit_task(modified.clone())
        .with_context(|| format!("Cannot edit task {}", id))?;
    workspace.save_planner(&planner)?;

    if output.is_json() {
        output.data(&modified)?;
    } else {
        output.success(&format!("Updated task {}: {}", modified.id, modified.name));
    }

    Ok(())
}

fn remove_task(output: &Output, id: TaskId) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let mut planner = workspace.load_planner()?;

    let dependents: Vec<TaskId> = planner.outgoing(id).iter().map(|r| r.dependent_id()).collect();
    let removed = planner
        .remove_task(id)
        .with_context(|| format!("Cannot remove task {}", id))?;
    workspace.save_planner(&planner)?;

    for dependent in &dependents {
        if planner.is_independent(*dependent) {
            output.verbose_ctx(
                "task",
                &format!(
                    "{} is now independent at day {}",
                    dependent,
                    planner.start_day(*dependent).unwrap_or_default()
                ),
            );
        }
    }

    output.success(&format!("Removed task {}: {}", removed.id, removed.name));
    Ok(())
}

fn list_tasks(output: &Output) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let planner = workspace.load_planner()?;
    let rows = task_rows(&planner);

    if output.is_json() {
        output.data(&rows)?;
        return Ok(());
    }

    if rows.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!("{:<8} {:>5} {:>5} {:<8} {:<12} NAME", "ID", "START", "DAYS", "COLOR", "KIND");
    println!("{}", "-".repeat(60));
    for row in &rows {
        println!(
            "{:<8} {:>5} {:>5} {:<8} {:<12} {}",
            row.id.to_string(),
            row.start,
            row.days,
            row.color.as_str(),
            if row.independent { "independent" } else { "dependent" },
            row.name
        );
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct TaskRow {
    id: TaskId,
    name: String,
    days: u32,
    color: Palette,
    start: u32,
    independent: bool,
}

fn task_rows(planner: &Planner) -> Vec<TaskRow> {
    planner
        .tasks_sorted_by_days()
        .into_iter()
        .flat_map(|(start, tasks)| {
            tasks.into_iter().map(move |task| (start, task))
        })
        .map(|(start, task)| TaskRow {
            independent: planner.is_independent(task.id),
            id: task.id,
            name: task.name,
            days: task.days,
            color: task.color,
            start,
        })
        .collect()
}

fn show_task(output: &Output, id: TaskId) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let planner = workspace.load_planner()?;

    let task = planner
        .task(id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;
    let start = planner.start_day(id).unwrap_or_default();
    let incoming = planner.incoming(id);
    let outgoing = planner.outgoing(id);

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id,
            "name": task.name,
            "days": task.days,
            "color": task.color,
            "start": start,
            "end": start.saturating_add(task.days),
            "independent": planner.is_independent(id),
            "after": incoming.iter().map(|r| serde_json::json!({
                "relationship": r.id,
                "task": r.influencer_id(),
                "gap": r.days_gap,
            })).collect::<Vec<_>>(),
            "before": outgoing.iter().map(|r| serde_json::json!({
                "relationship": r.id,
                "task": r.dependent_id(),
                "gap": r.days_gap,
            })).collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    println!("ID:     {}", task.id);
    println!("Name:   {}", task.name);
    println!("Days:   {}", task.days);
    println!("Color:  {}", task.color);
    println!("Start:  day {}", start);
    println!("End:    day {}", start.saturating_add(task.days));
    if planner.is_independent(id) {
        println!("Kind:   independent");
    } else {
        println!("Kind:   dependent");
    }

    if !incoming.is_empty() {
        println!();
        println!("After:");
        for rel in &incoming {
            println!("  {} ({}, gap {})", rel.influencer_id(), rel.id, rel.days_gap);
        }
    }

    if !outgoing.is_empty() {
        println!();
        println!("Before:");
        for rel in &outgoing {
            println!("  {} ({}, gap {})", rel.dependent_id(), rel.id, rel.days_gap);
        }
    }

    Ok(())
}
