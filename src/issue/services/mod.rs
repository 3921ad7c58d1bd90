//! Application services for issue management.

mod issue_service;

pub use issue_service::{CreateIssueRequest, IssueService, IssueServiceError, IssueServiceResult};
