//! Carry-over planning for sprint completion.

use super::{SprintDestination, SprintId};
use crate::issue::domain::{Issue, IssueId};

/// Which issues of a completing sprint move, and where to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintCompletionPlan {
    sprint_id: SprintId,
    destination: SprintDestination,
    carried_over: Vec<IssueId>,
    finished: Vec<IssueId>,
}

impl SprintCompletionPlan {
    /// Splits the sprint's issues into finished ones, which stay, and
    /// unfinished ones, which move to `destination`.
    ///
    /// Issues that belong to another sprint are ignored.
    #[must_use]
    pub fn new(sprint_id: SprintId, issues: &[Issue], destination: SprintDestination) -> Self {
        let (finished, carried_over): (Vec<&Issue>, Vec<&Issue>) = issues
            .iter()
            .filter(|issue| issue.sprint_id() == Some(sprint_id))
            .partition(|issue| issue.status().is_done());

        Self {
            sprint_id,
            destination,
            carried_over: carried_over.iter().map(|issue| issue.id()).collect(),
            finished: finished.iter().map(|issue| issue.id()).collect(),
        }
    }

    /// Returns the completing sprint.
    #[must_use]
    pub const fn sprint_id(&self) -> SprintId {
        self.sprint_id
    }

    /// Returns where unfinished issues go.
    #[must_use]
    pub const fn destination(&self) -> SprintDestination {
        self.destination
    }

    /// Returns the unfinished issues that move.
    #[must_use]
    pub fn carried_over(&self) -> &[IssueId] {
        &self.carried_over
    }

    /// Returns the finished issues that stay in the sprint.
    #[must_use]
    pub fn finished(&self) -> &[IssueId] {
        &self.finished
    }

    /// Returns whether nothing needs to move.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carried_over.is_empty()
    }
}
