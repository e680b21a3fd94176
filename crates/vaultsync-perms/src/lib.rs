//! # Vaultsync Permissions
//!
//! Share-grant reconciliation.
//!
//! ## Overview
//!
//! A share relates a folder or resource to a group at some level. The vault
//! has no read endpoint for that relationship, only share calls that grant
//! or revoke. This crate plans transitions between share states and executes
//! them against a [`VaultClient`](vaultsync_client::VaultClient).
//!
//! ## Key Types
//!
//! - [`PermissionReconciler`] - create, update, delete and read of one share
//! - [`SharePlan`] - revoke and grant calls for one transition
//! - [`ShareState`] - `Unshared` or `Shared(level)`
//! - [`PermsError`] - includes [`PermsError::PartialApplication`]
//!
//! ## Update Semantics
//!
//! Updates are two-phase and never diffed: the old subject is revoked, then
//! the new one is granted. A failed grant after a successful revoke leaves
//! the target unshared for the old subject and is reported as partial.

pub mod error;
pub mod reconciler;
pub mod state;

pub use error::{PermsError, Result};
pub use reconciler::{permission_level, PermissionReconciler};
pub use state::{SharePlan, ShareState, ShareTarget};
