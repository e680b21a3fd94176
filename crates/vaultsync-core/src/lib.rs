//! # Vaultsync Core
//!
//! Pure primitives for vaultsync: the vault data model, share grants,
//! reference resolution and descriptor validation.
//!
//! This crate contains no I/O and no async code. Everything that talks to a
//! vault lives in `vaultsync-client` and the reconciler crates built on it.
//!
//! ## Key Types
//!
//! - [`Folder`], [`Resource`] - vault entities as the collaborator returns them
//! - [`ShareOperation`] - one entry of a share call (level, ARO kind, ARO id)
//! - [`PermissionLevel`] - Read (1), Owner (7) and the Revoke (-1) sentinel
//! - [`ShareKey`] - derived local identity of a sharing relationship
//! - [`Resolution`] - result of resolving a name-or-ID reference
//!
//! ## Reference Resolution
//!
//! Lookups scan the collaborator's listing and the **last** match wins. A
//! miss is a typed [`Resolution::NotFound`], never an empty identifier.

pub mod error;
pub mod hierarchy;
pub mod model;
pub mod resolve;
pub mod share;
pub mod types;
pub mod validation;

pub use error::{LookupKind, LookupMiss, ValidationError};
pub use hierarchy::check_folder_move;
pub use model::{
    Ciphertext, DecryptedResource, Folder, Group, ListFilter, NewFolder, NewResource, PublicKey,
    Resource, ResourceType, SecretEntry, SecretFields, User,
};
pub use resolve::{resolve_folder_id, resolve_group_id, resolve_resource_type_id, Resolution};
pub use share::{PermissionLevel, ShareOperation, SubjectKind, TargetKind};
pub use types::ShareKey;
pub use validation::{
    FolderDescriptor, FolderSpec, SecretDescriptor, SecretSpec, ShareDescriptor, ShareSpec,
    SubjectRef,
};

/// Slug of the resource type every managed secret is created with.
pub const PASSWORD_AND_DESCRIPTION: &str = "password-and-description";
