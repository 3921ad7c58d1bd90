//! Domain model for issues and their hierarchy.
//!
//! Everything here is pure: no persistence, no clocks beyond the injected
//! [`mockable::Clock`], no I/O.

mod attachment;
mod classification;
mod error;
mod hierarchy;
mod ids;
mod issue;

pub use attachment::{Attachment, AttachmentKind};
pub use classification::{IssueStatus, IssueType};
pub use error::{IssueDomainError, ParseIssueStatusError, ParseIssueTypeError};
pub use hierarchy::{
    CompletionSummary, IssueHierarchy, allowed_child_types, can_transition_to_done,
    completed_count,
};
pub use ids::{IssueId, IssueKey, IssueNumber};
pub use issue::{Issue, IssueDraft, IssueUpdate, PersistedIssueData};
