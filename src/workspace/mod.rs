//! Workspace and project scoping for ProJexa.
//!
//! Issues and sprints always live inside one project of one workspace. This
//! module owns the identifiers for those scopes and the explicit
//! [`domain::SessionContext`] that services receive in place of ambient
//! session state.

pub mod domain;
