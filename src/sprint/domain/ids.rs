//! Identifier types for the sprint domain.

use crate::workspace::domain::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a sprint.
    SprintId
}
