//! Task domain model
//!
//! A task is a named block of work with a duration in days. Tasks are
//! values: editing one means handing the planner a new value with the
//! same id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::id::TaskId;

/// Presentation tag for a task. The planner never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    #[default]
    Red,
    Yellow,
    Blue,
    Orange,
    Grey,
    Green,
}

impl Palette {
    pub const ALL: [Palette; 6] = [
        Palette::Red,
        Palette::Yellow,
        Palette::Blue,
        Palette::Orange,
        Palette::Grey,
        Palette::Green,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Palette::Red => "red",
            Palette::Yellow => "yellow",
            Palette::Blue => "blue",
            Palette::Orange => "orange",
            Palette::Grey => "grey",
            Palette::Green => "green",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Palette::ALL
            .into_iter()
            .find(|p| p.as_str() == s || (s == "gray" && *p == Palette::Grey))
            .ok_or_else(|| {
                format!(
                    "unknown color '{}', expected one of: red, yellow, blue, orange, grey, green",
                    s
                )
            })
    }
}

/// A unit of work with a duration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the project
    pub id: TaskId,

    /// Display name
    pub name: String,

    /// Duration in days, always positive once admitted
    pub days: u32,

    /// Display color
    #[serde(default)]
    pub color: Palette,
}

impl Task {
    /// Creates a new task with the default color
    pub fn new(id: TaskId, name: impl Into<String>, days: u32) -> Self {
        Self {
            id,
            name: name.into(),
            days,
            color: Palette::default(),
        }
    }

    /// Returns a copy of this task with another color
    pub fn with_color(mut self, color: Palette) -> Self {
        self.color = color;
        self
    }

    /// Returns a copy of this task with another duration
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Returns a copy of this task with another name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
