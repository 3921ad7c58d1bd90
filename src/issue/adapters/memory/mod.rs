//! In-memory adapters for issue ports.

mod issue;

pub use issue::InMemoryIssueRepository;
