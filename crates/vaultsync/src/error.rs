//! Error types for the orchestrator.
//!
//! Every failure is wrapped with the entity kind and operation it came from,
//! and can be classified into an [`ErrorClass`] for host diagnostics.

use std::fmt;

use thiserror::Error;

use vaultsync_core::ValidationError;
use vaultsync_perms::PermsError;
use vaultsync_reconcile::ReconcileError;

/// The kind of entity an operation was reconciling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Folder,
    Secret,
    FolderShare,
    ResourceShare,
    FolderData,
    SecretData,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Folder => "folder",
            EntityKind::Secret => "secret",
            EntityKind::FolderShare => "folder share",
            EntityKind::ResourceShare => "resource share",
            EntityKind::FolderData => "folder data source",
            EntityKind::SecretData => "secret data source",
        };
        f.write_str(name)
    }
}

/// Lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A required attribute is missing or malformed. Nothing was sent.
    Configuration,
    /// A name-or-ID reference matched nothing.
    LookupMiss,
    /// The vault rejected a call or could not be reached.
    RemoteCall,
    /// The public key could not be fetched or the secret not encrypted.
    Encryption,
    /// A revoke succeeded but the grant after it failed.
    PartialApplication,
    /// The entity is gone from the vault.
    NotFound,
    Cancelled,
}

/// Underlying cause of an [`OrchestratorError`].
#[derive(Debug, Error)]
pub enum Cause {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Perms(#[from] PermsError),
}

/// A failed orchestrator operation.
#[derive(Debug, Error)]
#[error("{operation} {entity}: {source}")]
pub struct OrchestratorError {
    pub entity: EntityKind,
    pub operation: Operation,
    #[source]
    pub source: Cause,
}

impl OrchestratorError {
    pub fn new(entity: EntityKind, operation: Operation, source: impl Into<Cause>) -> Self {
        Self {
            entity,
            operation,
            source: source.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match &self.source {
            Cause::Validation(_) => ErrorClass::Configuration,
            Cause::Reconcile(err) => match err {
                ReconcileError::Configuration(_) => ErrorClass::Configuration,
                ReconcileError::LookupMiss(_) => ErrorClass::LookupMiss,
                ReconcileError::Remote { .. } => ErrorClass::RemoteCall,
                ReconcileError::Encryption(_) => ErrorClass::Encryption,
                ReconcileError::NotFound { .. } => ErrorClass::NotFound,
                ReconcileError::Cancelled => ErrorClass::Cancelled,
            },
            Cause::Perms(err) => match err {
                PermsError::Remote { .. } => ErrorClass::RemoteCall,
                PermsError::PartialApplication { .. } => ErrorClass::PartialApplication,
                PermsError::LookupMiss(_) => ErrorClass::LookupMiss,
                PermsError::Cancelled => ErrorClass::Cancelled,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.class() == ErrorClass::NotFound
    }
}

/// Failure to load a [`VaultsyncConfig`](crate::VaultsyncConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for orchestrator operations.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
