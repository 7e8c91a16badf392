//! Closed status, size, and priority vocabularies for tasks.

use super::{ParseTaskPriorityError, ParseTaskSizeError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// A task has exactly one status at any instant; no task may exist outside
/// this set. Unknown wire values are rejected at the parsing boundary so the
/// policy engine only ever sees members of the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Work has not started.
    Todo,
    /// Work is actively underway.
    InProgress,
    /// Work is awaiting review.
    InReview,
    /// Work has been accepted by a project owner.
    Validated,
    /// Work is parked pending an external decision.
    Blocked,
    /// The task has been discarded.
    Trash,
}

impl TaskStatus {
    /// Every status in board-column order.
    pub const ALL: [Self; 6] = [
        Self::Todo,
        Self::InProgress,
        Self::InReview,
        Self::Validated,
        Self::Blocked,
        Self::Trash,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::InReview => "IN_REVIEW",
            Self::Validated => "VALIDATED",
            Self::Blocked => "BLOCKED",
            Self::Trash => "TRASH",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "IN_REVIEW" => Ok(Self::InReview),
            "VALIDATED" => Ok(Self::Validated),
            "BLOCKED" => Ok(Self::Blocked),
            "TRASH" => Ok(Self::Trash),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effort estimate for a task.
///
/// Orthogonal to status; carries no transition semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskSize {
    /// Extra-small effort.
    Xs,
    /// Small effort.
    S,
    /// Medium effort.
    M,
    /// Large effort.
    L,
}

impl TaskSize {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
        }
    }
}

impl TryFrom<&str> for TaskSize {
    type Error = ParseTaskSizeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "XS" => Ok(Self::Xs),
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            _ => Err(ParseTaskSizeError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduling priority for a task.
///
/// Opaque payload to the policy engine; relayed unchanged during moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// May wait.
    Low,
    /// Default priority.
    Medium,
    /// Should be picked up next.
    High,
}

impl TaskPriority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
