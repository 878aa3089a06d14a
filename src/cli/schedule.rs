//! Schedule and status queries

use anyhow::Result;

use super::output::Output;
use crate::storage::Workspace;

/// Prints every task grouped by the day it starts
pub fn schedule(output: &Output) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let planner = workspace.load_planner()?;
    let by_day = planner.tasks_sorted_by_days();

    output.verbose_ctx("schedule", &format!("{} start days", by_day.len()));

    if output.is_json() {
        let days: Vec<_> = by_day
            .iter()
            .map(|(day, tasks)| {
                serde_json::json!({
                    "day": day,
                    "tasks": tasks,
                })
            })
            .collect();
        output.data(&days)?;
        return Ok(());
    }

    if planner.project().tasks().is_empty() {
        println!("No tasks scheduled.");
        return Ok(());
    }

    for (day, tasks) in by_day.iter().filter(|(_, tasks)| !tasks.is_empty()) {
        println!("Day {}:", day);
        for task in tasks {
            let end = day.saturating_add(task.days);
            println!("  {:<8} {} (days {}-{})", task.id.to_string(), task.name, day, end);
        }
    }

    Ok(())
}

/// Prints a project overview
pub fn status(output: &Output) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let planner = workspace.load_planner()?;
    let project = planner.project();

    let independent = project.independent_tasks().len();
    let end_day = planner.end_day();

    if output.is_json() {
        output.data(&serde_json::json!({
            "name": project.name(),
            "start_date": project.start_date(),
            "tasks": project.tasks().len(),
            "relationships": project.relationships().len(),
            "independent": independent,
            "dependent": project.tasks().len().saturating_sub(independent),
            "end_day": end_day,
        }))?;
        return Ok(());
    }

    println!("Project: {}", project.name());
    println!("Starts:  {}", project.start_date());
    println!();
    println!(
        "Tasks:         {} ({} independent, {} dependent)",
        project.tasks().len(),
        independent,
        project.tasks().len().saturating_sub(independent)
    );
    println!("Relationships: {}", project.relationships().len());
    println!("Length:        {} days", end_day);

    Ok(())
}
