//! Identifiers for tasks and relationships
//!
//! ID Format:
//! - Task IDs: `t-{number}` (e.g., `t-3`)
//! - Relationship IDs: `r-{number}` (e.g., `r-12`)
//!
//! Parsing also accepts the bare number (`3`), which is what people type
//! on the command line. Identity is the number; the prefix only tells the
//! two kinds apart when printed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid task ID format: expected 't-{{number}}' or '{{number}}', got '{0}'")]
    InvalidTaskId(String),

    #[error("Invalid relationship ID format: expected 'r-{{number}}' or '{{number}}', got '{0}'")]
    InvalidRelationshipId(String),
}

/// Parses `{prefix}-{number}` or a bare number
fn parse_numeric(s: &str, prefix: &str) -> Option<u64> {
    let s = s.trim();
    let digits = s
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(s);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}

/// Task ID, unique within a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value of the ID
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the ID that follows this one
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t-{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_numeric(s, "t")
            .map(Self)
            .ok_or_else(|| IdError::InvalidTaskId(s.trim().to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}

/// Relationship ID, unique within a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelationshipId(u64);

impl RelationshipId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value of the ID
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the ID that follows this one
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r-{}", self.0)
    }
}

impl FromStr for RelationshipId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_numeric(s, "r")
            .map(Self)
            .ok_or_else(|| IdError::InvalidRelationshipId(s.trim().to_string()))
    }
}

impl TryFrom<String> for RelationshipId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RelationshipId> for String {
    fn from(id: RelationshipId) -> Self {
        id.to_string()
    }
}
