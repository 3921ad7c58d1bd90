//! Error types for sprint domain validation and parsing.

use super::{SprintId, SprintStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or transitioning sprints.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SprintDomainError {
    /// The sprint name is empty after trimming.
    #[error("sprint name must not be empty")]
    EmptyName,

    /// The end date is not after the start date.
    #[error("End date must be after start date")]
    InvalidDateRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// The lifecycle does not allow the requested transition.
    #[error("sprint {sprint_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Sprint whose transition was rejected.
        sprint_id: SprintId,
        /// Current status.
        from: SprintStatus,
        /// Requested status.
        to: SprintStatus,
    },

    /// Issues cannot be planned into a completed sprint.
    #[error("sprint {0} is completed and no longer accepts issues")]
    SprintClosed(SprintId),

    /// The carry-over destination is neither `backlog` nor a sprint id.
    #[error("invalid sprint destination '{0}', expected 'backlog' or a sprint id")]
    InvalidDestination(String),

    /// Unfinished issues cannot be carried over into the sprint being
    /// completed.
    #[error("sprint {0} cannot receive its own unfinished issues")]
    DestinationIsSelf(SprintId),

    /// Unfinished issues can only be carried over into a planned sprint.
    #[error("destination sprint {sprint_id} is {status}, expected planned")]
    DestinationNotPlanned {
        /// Destination sprint.
        sprint_id: SprintId,
        /// Its current status.
        status: SprintStatus,
    },
}

/// Error returned while parsing sprint statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint status: {0}")]
pub struct ParseSprintStatusError(pub String);
