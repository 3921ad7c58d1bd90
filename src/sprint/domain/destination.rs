//! Where unfinished issues go when a sprint completes.

use super::{SprintDomainError, SprintId};
use std::fmt;
use uuid::Uuid;

/// Carry-over destination for unfinished issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SprintDestination {
    /// Move issues out of any sprint.
    #[default]
    Backlog,
    /// Move issues into another sprint.
    Sprint(SprintId),
}

impl SprintDestination {
    /// Sentinel accepted in place of a sprint id.
    pub const BACKLOG_SENTINEL: &'static str = "backlog";

    /// Parses an optional client-supplied destination.
    ///
    /// `None`, a blank string and `"backlog"` (any case) select the backlog;
    /// anything else must be a sprint UUID.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidDestination`] for any other value.
    pub fn parse(value: Option<&str>) -> Result<Self, SprintDomainError> {
        let Some(raw) = value else {
            return Ok(Self::Backlog);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::BACKLOG_SENTINEL) {
            return Ok(Self::Backlog);
        }
        Uuid::parse_str(trimmed)
            .map(|uuid| Self::Sprint(SprintId::from_uuid(uuid)))
            .map_err(|_| SprintDomainError::InvalidDestination(raw.to_owned()))
    }

    /// Returns the sprint to assign, `None` for the backlog.
    #[must_use]
    pub const fn sprint_id(self) -> Option<SprintId> {
        match self {
            Self::Backlog => None,
            Self::Sprint(sprint_id) => Some(sprint_id),
        }
    }
}

impl From<Option<SprintId>> for SprintDestination {
    fn from(value: Option<SprintId>) -> Self {
        value.map_or(Self::Backlog, Self::Sprint)
    }
}

impl fmt::Display for SprintDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backlog => f.write_str(Self::BACKLOG_SENTINEL),
            Self::Sprint(sprint_id) => write!(f, "{sprint_id}"),
        }
    }
}
