//! Error types for folder and secret reconciliation.

use thiserror::Error;

use vaultsync_client::ClientError;
use vaultsync_core::{LookupMiss, ValidationError};

/// Errors that can occur while reconciling a folder or secret.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Descriptor or hierarchy check failed before any mutation.
    #[error("configuration error: {0}")]
    Configuration(#[from] ValidationError),

    /// A name-or-ID reference matched nothing.
    #[error(transparent)]
    LookupMiss(#[from] LookupMiss),

    /// A vault call failed. `call` names the step that failed.
    #[error("{call} failed: {source}")]
    Remote {
        call: &'static str,
        #[source]
        source: ClientError,
    },

    /// Fetching the public key or encrypting the secret failed.
    #[error("encryption failed: {0}")]
    Encryption(#[source] ClientError),

    /// The entity no longer exists on the vault.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("reconciliation cancelled")]
    Cancelled,
}

impl ReconcileError {
    pub(crate) fn remote(call: &'static str, source: ClientError) -> Self {
        match source {
            ClientError::Cancelled => ReconcileError::Cancelled,
            source => ReconcileError::Remote { call, source },
        }
    }

    /// Like [`ReconcileError::remote`], but a vault-side miss becomes `NotFound`.
    pub(crate) fn read(call: &'static str, source: ClientError) -> Self {
        match source {
            ClientError::NotFound { kind, id } => ReconcileError::NotFound { kind, id },
            source => Self::remote(call, source),
        }
    }

    pub(crate) fn encryption(source: ClientError) -> Self {
        match source {
            ClientError::Cancelled => ReconcileError::Cancelled,
            source => ReconcileError::Encryption(source),
        }
    }

    /// The vault call that failed, if this is a remote failure.
    pub fn failed_call(&self) -> Option<&'static str> {
        match self {
            ReconcileError::Remote { call, .. } => Some(call),
            _ => None,
        }
    }
}

/// Result type for reconciliation.
pub type Result<T> = std::result::Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_maps_not_found() {
        let err = ReconcileError::read("get_folder", ClientError::not_found("folder", "f1"));
        assert!(matches!(err, ReconcileError::NotFound { kind: "folder", .. }));
    }

    #[test]
    fn test_remote_keeps_not_found_as_remote() {
        let err = ReconcileError::remote("delete_folder", ClientError::not_found("folder", "f1"));
        assert_eq!(err.failed_call(), Some("delete_folder"));
    }

    #[test]
    fn test_cancelled_is_not_remote() {
        assert!(matches!(
            ReconcileError::remote("x", ClientError::Cancelled),
            ReconcileError::Cancelled
        ));
        assert!(matches!(
            ReconcileError::encryption(ClientError::Cancelled),
            ReconcileError::Cancelled
        ));
    }
}
