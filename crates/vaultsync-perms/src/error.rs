//! Error types for share reconciliation.

use thiserror::Error;

use vaultsync_client::ClientError;
use vaultsync_core::LookupMiss;

use crate::state::ShareTarget;

/// Errors that can occur while reconciling a share.
#[derive(Debug, Error)]
pub enum PermsError {
    /// A share or lookup call failed before anything changed on the vault.
    #[error("{call} failed: {source}")]
    Remote {
        call: &'static str,
        #[source]
        source: ClientError,
    },

    /// The revoke went through but the grant that should follow it did not.
    ///
    /// The target is left unshared for `revoked` and `intended` holds no grant.
    #[error(
        "revoked {revoked} on {target} but granting {intended} failed: {source}; \
         target is now unshared for {revoked}"
    )]
    PartialApplication {
        target: ShareTarget,
        revoked: String,
        intended: String,
        #[source]
        source: ClientError,
    },

    /// A group named by the descriptor does not exist.
    #[error(transparent)]
    LookupMiss(#[from] LookupMiss),

    /// Cancelled before the first call took effect.
    #[error("share cancelled")]
    Cancelled,
}

impl PermsError {
    pub(crate) fn remote(call: &'static str, source: ClientError) -> Self {
        match source {
            ClientError::Cancelled => PermsError::Cancelled,
            source => PermsError::Remote { call, source },
        }
    }

    /// Whether the vault was left different from both the old and new state.
    pub fn is_partial(&self) -> bool {
        matches!(self, PermsError::PartialApplication { .. })
    }
}

/// Result type for share reconciliation.
pub type Result<T> = std::result::Result<T, PermsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use vaultsync_core::TargetKind;

    #[test]
    fn test_cancelled_call_is_not_remote() {
        let err = PermsError::remote("share_folder", ClientError::Cancelled);
        assert!(matches!(err, PermsError::Cancelled));
    }

    #[test]
    fn test_partial_message_names_revoked_subject() {
        let err = PermsError::PartialApplication {
            target: ShareTarget::new(TargetKind::Resource, "r1"),
            revoked: "g-old".into(),
            intended: "g-new".into(),
            source: ClientError::Transport("reset".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("g-old"));
        assert!(msg.contains("Resource r1"));
        assert!(err.is_partial());
    }
}
