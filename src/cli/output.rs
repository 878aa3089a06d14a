//! Output formatting for CLI commands
//!
//! Commands print either human text or one JSON document on stdout.
//! Verbose traces go to stderr so JSON stays parseable.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::storage;

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<storage::OutputFormat> for OutputFormat {
    fn from(format: storage::OutputFormat) -> Self {
        match format {
            storage::OutputFormat::Text => OutputFormat::Text,
            storage::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Serializes a command result as a single line of JSON
pub fn to_json_line<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string(data).context("Failed to serialize command output")
}

/// Where command results and traces are written
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a confirmation, wrapped as `{"success": true, ...}` in JSON mode
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints a JSON payload. Text rendering is up to each command.
    pub fn data<T: Serialize>(&self, data: &T) -> Result<()> {
        println!("{}", to_json_line(data)?);
        Ok(())
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a trace line on stderr when `--verbose` is set
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Same as [`Output::verbose`], tagged with the command it comes from
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
