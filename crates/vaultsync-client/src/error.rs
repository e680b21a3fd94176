//! Error types for vault collaborator calls.

use thiserror::Error;

/// Errors a vault call can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The addressed entity does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// The vault refused the request (validation, permissions, conflicts).
    #[error("rejected by vault: {0}")]
    Rejected(String),

    /// Network or session failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Public-key fetch or encryption failed.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Decryption of a stored secret failed on the vault side.
    #[error("decryption error: {0}")]
    Decryption(String),

    /// The caller's cancellation signal fired.
    #[error("call cancelled")]
    Cancelled,
}

impl ClientError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ClientError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

/// Result type for vault calls.
pub type Result<T> = std::result::Result<T, ClientError>;
