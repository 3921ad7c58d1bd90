//! Lifecycle rules that are product decisions rather than invariants.

use serde::{Deserialize, Serialize};

/// What happens to children when a parent issue is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildDeletionPolicy {
    /// Refuse to delete issues that still have children.
    #[default]
    Reject,
    /// Delete the issue together with all of its descendants.
    Cascade,
}

const fn default_single_active_sprint() -> bool {
    true
}

/// Issue and sprint lifecycle settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LifecycleConfig {
    /// Refuse to start a sprint while another sprint of the project is
    /// active.
    #[serde(default = "default_single_active_sprint")]
    pub single_active_sprint: bool,

    /// Behaviour when deleting an issue that has children.
    #[serde(default)]
    pub child_deletion: ChildDeletionPolicy,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            single_active_sprint: default_single_active_sprint(),
            child_deletion: ChildDeletionPolicy::default(),
        }
    }
}
