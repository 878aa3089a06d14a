//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use super::logging::init_logging;
use super::output::{Output, OutputFormat};
use super::{link, schedule, task};
use crate::storage::{Config, Workspace};

#[derive(Parser)]
#[command(name = "gantt")]
#[command(author, version, about = "Local-first project planning with task dependencies")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Project name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,

        /// Calendar date of day 0, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },

    /// Manage tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Manage relationships between tasks
    #[command(subcommand)]
    Link(link::LinkCommands),

    /// Show tasks grouped by start day
    Schedule,

    /// Show project status overview
    Status,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = cli.format.unwrap_or_else(configured_format);
    let output = Output::new(format, cli.verbose);

    output.verbose("Gantt CLI starting");

    match cli.command {
        Commands::Init {
            path,
            name,
            start_date,
        } => init(&output, &path, name, start_date)?,

        Commands::Task(cmd) => task::run(cmd, &output)?,
        Commands::Link(cmd) => link::run(cmd, &output)?,

        Commands::Schedule => {
            output.verbose("Computing schedule");
            schedule::schedule(&output)?
        }
        Commands::Status => {
            output.verbose("Gathering project status");
            schedule::status(&output)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Output format from the global config, text if there is none
fn configured_format() -> OutputFormat {
    Config::load()
        .map(|config| config.global.default_format.into())
        .unwrap_or_default()
}

fn init(
    output: &Output,
    path: &str,
    name: Option<String>,
    start_date: Option<NaiveDate>,
) -> Result<()> {
    let root = PathBuf::from(path);
    let root = if root.is_absolute() {
        root
    } else {
        std::env::current_dir()?.join(root)
    };
    let name = name
        .or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "Untitled project".to_string());
    let start_date = start_date.unwrap_or_else(|| chrono::Local::now().date_naive());

    output.verbose_ctx(
        "init",
        &format!("Initializing '{}' at {} starting {}", name, root.display(), start_date),
    );
    let workspace = Workspace::init(&root, &name, start_date)?;
    output.verbose_ctx(
        "init",
        &format!("Created .gantt directory at: {}", workspace.gantt_dir().display()),
    );
    output.success(&format!(
        "Initialized gantt project at {}",
        workspace.root().display()
    ));

    Ok(())
}
