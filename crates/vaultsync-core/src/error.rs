//! Error types for vaultsync core.

use std::fmt;

use thiserror::Error;

/// Descriptor problems detected before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required attribute `{0}` is missing")]
    MissingField(&'static str),

    #[error("attribute `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("attributes `{0}` and `{1}` are mutually exclusive")]
    ConflictingFields(&'static str, &'static str),

    #[error("folder {0} cannot be its own parent")]
    SelfParent(String),

    #[error("moving folder {folder_id} under {parent_id} would create a cycle")]
    FolderCycle { folder_id: String, parent_id: String },

    #[error("parent folder {0} does not exist")]
    UnknownParent(String),
}

/// What kind of listing a reference was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Folder,
    ResourceType,
    Group,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Folder => f.write_str("folder"),
            LookupKind::ResourceType => f.write_str("resource type"),
            LookupKind::Group => f.write_str("group"),
        }
    }
}

/// A name-or-ID reference that matched nothing in the vault's listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} `{reference}` not found")]
pub struct LookupMiss {
    pub kind: LookupKind,
    pub reference: String,
}

impl LookupMiss {
    pub fn new(kind: LookupKind, reference: impl Into<String>) -> Self {
        Self {
            kind,
            reference: reference.into(),
        }
    }
}
