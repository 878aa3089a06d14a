//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup | `init`, `status` |
//! | Task | Work items | `task add`, `task edit`, `task remove` |
//! | Link | Dependencies | `link add`, `link remove`, `link list` |
//! | Query | Derived view | `schedule` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output, including the planner's
//! `tracing` events:
//! ```bash
//! gantt --verbose schedule
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod logging;
mod output;
mod task;
mod link;
mod schedule;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
