//! Parent/child derivation over flat issue lists.
//!
//! Issues only store a reference to their parent; every downward view is
//! computed here by filtering. Results keep the order of the input slice.

use super::{Issue, IssueId, IssueType};
use std::collections::HashSet;

const NON_SUBTASK_CHILDREN: &[IssueType] = &[IssueType::Story, IssueType::Task, IssueType::Bug];
const SUBTASK_ONLY: &[IssueType] = &[IssueType::Subtask];

/// Returns the issue types that may be created under a parent of
/// `parent_type` (or at the top level when `None`).
///
/// Epics are created through their own top-level action and never appear
/// in this list.
#[must_use]
pub const fn allowed_child_types(parent_type: Option<IssueType>) -> &'static [IssueType] {
    match parent_type {
        None | Some(IssueType::Epic) => NON_SUBTASK_CHILDREN,
        Some(IssueType::Story | IssueType::Task | IssueType::Bug | IssueType::Subtask) => {
            SUBTASK_ONLY
        }
    }
}

/// Counts the issues whose status is done.
#[must_use]
pub fn completed_count<'a>(children: impl IntoIterator<Item = &'a Issue>) -> usize {
    children
        .into_iter()
        .filter(|child| child.status().is_done())
        .count()
}

/// Returns whether `issue` may move to done given the project's issues.
///
/// Leaf issues may always move to done. Parents may only once every direct
/// child is done.
#[must_use]
pub fn can_transition_to_done(issue: &Issue, all_issues: &[Issue]) -> bool {
    IssueHierarchy::new(all_issues)
        .children_of(issue.id())
        .iter()
        .all(|child| child.status().is_done())
}

/// Completed versus total direct children of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompletionSummary {
    /// Number of direct children that are done.
    pub completed: usize,
    /// Number of direct children.
    pub total: usize,
}

impl CompletionSummary {
    /// Returns the number of children that are not done.
    #[must_use]
    pub const fn remaining(self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    /// Returns whether every child is done. Leaves count as complete.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.completed == self.total
    }
}

/// Read-only hierarchy view over a flat slice of issues.
#[derive(Debug, Clone, Copy)]
pub struct IssueHierarchy<'a> {
    issues: &'a [Issue],
}

impl<'a> IssueHierarchy<'a> {
    /// Wraps a flat issue list.
    #[must_use]
    pub const fn new(issues: &'a [Issue]) -> Self {
        Self { issues }
    }

    /// Looks up an issue by identifier.
    #[must_use]
    pub fn get(&self, issue_id: IssueId) -> Option<&'a Issue> {
        self.issues.iter().find(|issue| issue.id() == issue_id)
    }

    /// Returns the direct children of `issue_id` in source order.
    #[must_use]
    pub fn children_of(&self, issue_id: IssueId) -> Vec<&'a Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.parent_id() == Some(issue_id))
            .collect()
    }

    /// Returns every transitive descendant of `issue_id`, parents before
    /// their children.
    #[must_use]
    pub fn descendants_of(&self, issue_id: IssueId) -> Vec<&'a Issue> {
        let mut visited = HashSet::from([issue_id]);
        let mut descendants = Vec::new();
        let mut frontier = vec![issue_id];

        while let Some(current) = frontier.pop() {
            for child in self.children_of(current) {
                if visited.insert(child.id()) {
                    descendants.push(child);
                    frontier.push(child.id());
                }
            }
        }
        descendants
    }

    /// Returns completed and total counts for the direct children of
    /// `issue_id`.
    #[must_use]
    pub fn completion_summary(&self, issue_id: IssueId) -> CompletionSummary {
        let children = self.children_of(issue_id);
        CompletionSummary {
            completed: completed_count(children.iter().copied()),
            total: children.len(),
        }
    }

    /// Returns whether `issue_id` may move to done.
    #[must_use]
    pub fn can_transition_to_done(&self, issue_id: IssueId) -> bool {
        self.completion_summary(issue_id).is_complete()
    }
}
