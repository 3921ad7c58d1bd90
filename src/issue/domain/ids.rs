//! Identifier and validated scalar types for the issue domain.

use super::IssueDomainError;
use crate::workspace::domain::{ProjectKey, uuid_identifier};
use serde::{Deserialize, Serialize};
use std::fmt;

uuid_identifier! {
    /// Unique identifier for an issue.
    IssueId
}

/// Positive per-project issue sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Largest number representable in the `BIGINT` storage column.
    const MAX_PERSISTED_VALUE: u64 = i64::MAX as u64;

    /// Creates a validated issue number.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::InvalidIssueNumber`] when the value is zero
    /// or exceeds `i64::MAX`.
    pub const fn new(value: u64) -> Result<Self, IssueDomainError> {
        if value == 0 || value > Self::MAX_PERSISTED_VALUE {
            return Err(IssueDomainError::InvalidIssueNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable issue key, e.g. `MAR-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueKey {
    project_key: ProjectKey,
    number: IssueNumber,
}

impl IssueKey {
    /// Creates an issue key from validated parts.
    #[must_use]
    pub const fn new(project_key: ProjectKey, number: IssueNumber) -> Self {
        Self {
            project_key,
            number,
        }
    }

    /// Parses a key of the form `KEY-<number>`.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::InvalidIssueKey`] when the prefix or the
    /// number is malformed.
    pub fn parse(value: &str) -> Result<Self, IssueDomainError> {
        let invalid = || IssueDomainError::InvalidIssueKey(value.to_owned());
        let (prefix, number) = value.trim().rsplit_once('-').ok_or_else(invalid)?;
        let project_key = ProjectKey::new(prefix).map_err(|_| invalid())?;
        let parsed_number = number.parse::<u64>().map_err(|_| invalid())?;
        let issue_number = IssueNumber::new(parsed_number).map_err(|_| invalid())?;
        Ok(Self::new(project_key, issue_number))
    }

    /// Returns the project key prefix.
    #[must_use]
    pub const fn project_key(&self) -> &ProjectKey {
        &self.project_key
    }

    /// Returns the per-project sequence number.
    #[must_use]
    pub const fn number(&self) -> IssueNumber {
        self.number
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.project_key, self.number)
    }
}
