//! Project key used to prefix human-readable issue keys.

use super::WorkspaceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Uppercase project key such as `MAR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectKey(String);

impl ProjectKey {
    const MIN_LEN: usize = 2;
    const MAX_LEN: usize = 10;

    /// Creates a validated project key, normalising to uppercase.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::InvalidProjectKey`] when the key is not
    /// 2-10 ASCII letters or digits starting with a letter.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkspaceDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_uppercase();
        let starts_with_letter = normalized
            .chars()
            .next()
            .is_some_and(|first| first.is_ascii_uppercase());
        let is_valid = starts_with_letter
            && (Self::MIN_LEN..=Self::MAX_LEN).contains(&normalized.len())
            && normalized.chars().all(|ch| ch.is_ascii_alphanumeric());

        if !is_valid {
            return Err(WorkspaceDomainError::InvalidProjectKey(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectKey {
    type Error = WorkspaceDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectKey> for String {
    fn from(value: ProjectKey) -> Self {
        value.0
    }
}

impl AsRef<str> for ProjectKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
