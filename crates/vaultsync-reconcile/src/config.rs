//! Reconciler configuration.

use serde::{Deserialize, Serialize};

use vaultsync_core::PASSWORD_AND_DESCRIPTION;

/// Configuration shared by the folder and secret reconcilers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Slug of the resource type new secrets are created with.
    pub resource_type_slug: String,
    /// Reject folder moves that would create a cycle before issuing them.
    pub validate_folder_moves: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            resource_type_slug: PASSWORD_AND_DESCRIPTION.to_string(),
            validate_folder_moves: false,
        }
    }
}
