//! Issue type and status enumerations.

use super::{ParseIssueStatusError, ParseIssueTypeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of issue classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Top-level container aggregating related work.
    Epic,
    /// User-facing increment of functionality.
    Story,
    /// Unit of technical work.
    Task,
    /// Defect report.
    Bug,
    /// Breakdown of a story, task, bug or another subtask.
    Subtask,
}

impl IssueType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Epic => "epic",
            Self::Story => "story",
            Self::Task => "task",
            Self::Bug => "bug",
            Self::Subtask => "subtask",
        }
    }

    /// Returns whether this type is an epic.
    #[must_use]
    pub const fn is_epic(self) -> bool {
        matches!(self, Self::Epic)
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for IssueType {
    type Error = ParseIssueTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "epic" => Ok(Self::Epic),
            "story" => Ok(Self::Story),
            "task" => Ok(Self::Task),
            "bug" => Ok(Self::Bug),
            "subtask" => Ok(Self::Subtask),
            _ => Err(ParseIssueTypeError(value.to_owned())),
        }
    }
}

/// Workflow status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Work has not started.
    Todo,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Done,
}

impl IssueStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns whether the status is [`IssueStatus::Done`].
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Parses status labels written by older clients.
    ///
    /// Accepts the historical spellings (`"Done"`, `"completed"`,
    /// `"In Progress"`, `"To Do"`, ...) on top of the canonical names. Only
    /// data migration should call this; everything else goes through
    /// [`TryFrom<&str>`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseIssueStatusError`] when the label is not recognised.
    pub fn from_legacy_label(value: &str) -> Result<Self, ParseIssueStatusError> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace([' ', '-'], "_");
        match normalized.as_str() {
            "todo" | "to_do" => Ok(Self::Todo),
            "in_progress" | "inprogress" => Ok(Self::InProgress),
            "done" | "completed" => Ok(Self::Done),
            _ => Err(ParseIssueStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for IssueStatus {
    type Error = ParseIssueStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseIssueStatusError(value.to_owned())),
        }
    }
}
