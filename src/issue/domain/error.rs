//! Error types for issue domain validation and parsing.

use super::{IssueId, IssueType};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating issues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueDomainError {
    /// The issue title is empty after trimming.
    #[error("Issue title is required")]
    EmptyTitle,

    /// The per-project issue number is zero or too large to persist.
    #[error("invalid issue number {0}, expected a positive integer")]
    InvalidIssueNumber(u64),

    /// The issue key is not of the form `KEY-<number>`.
    #[error("invalid issue key '{0}', expected KEY-<number>")]
    InvalidIssueKey(String),

    /// A subtask was created without a parent.
    #[error("a subtask must have a parent issue")]
    SubtaskRequiresParent,

    /// An epic was created under another issue.
    #[error("an epic cannot have a parent issue")]
    EpicCannotHaveParent,

    /// The requested type is not allowed under the parent's type.
    #[error("a {child_type} cannot be created under a {parent_type}")]
    ChildTypeNotAllowed {
        /// Type of the parent issue.
        parent_type: IssueType,
        /// Requested type of the new child.
        child_type: IssueType,
    },

    /// The parent issue belongs to a different project.
    #[error("parent issue {0} belongs to a different project")]
    ParentOutsideProject(IssueId),

    /// The issue still has children that are not done.
    #[error("Finish all subtasks before moving to done")]
    IncompleteChildren {
        /// Issue whose transition was rejected.
        issue_id: IssueId,
        /// Number of children that are not yet done.
        remaining: usize,
    },

    /// The end date precedes the start date.
    #[error("end date {end} is before start date {start}")]
    InvalidDateRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// An attachment URL is empty after trimming.
    #[error("attachment URL must not be empty")]
    EmptyAttachmentUrl,

    /// An attachment URL is not an `http(s)` URL.
    #[error("attachment URL '{0}' must start with 'http://' or 'https://'")]
    InvalidAttachmentUrl(String),

    /// A file attachment has no display name.
    #[error("file attachment name must not be empty")]
    EmptyAttachmentName,

    /// No attachment with the URL exists on the issue.
    #[error("issue {issue_id} has no attachment with URL '{url}'")]
    AttachmentNotFound {
        /// Issue that was searched.
        issue_id: IssueId,
        /// URL that was not found.
        url: String,
    },
}

/// Error returned while parsing issue types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue type: {0}")]
pub struct ParseIssueTypeError(pub String);

/// Error returned while parsing issue statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue status: {0}")]
pub struct ParseIssueStatusError(pub String);
