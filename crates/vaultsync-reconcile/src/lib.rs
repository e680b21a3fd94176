//! # Vaultsync Reconcile
//!
//! Folder and secret reconciliation against a credential vault.
//!
//! ## Overview
//!
//! Reconcilers take a validated desired state and the last observed state
//! and issue the vault calls needed to converge them. They hold no state of
//! their own, spawn no tasks and never retry. Every call is gated on the
//! caller's [`CancelSignal`](vaultsync_client::CancelSignal).
//!
//! ## Key Types
//!
//! - [`FolderReconciler`] - create, read, update (move then update), delete
//! - [`SecretReconciler`] - create (resolve, encrypt, submit), read, update, delete
//! - [`SecretCipher`] - public-key fetch plus encrypt, through the vault
//! - [`ReconcileConfig`] - resource type slug and folder move validation
//!
//! ## Ordering
//!
//! | operation | calls |
//! |---|---|
//! | folder update | move (if parent changed), update |
//! | secret create | resource types, folders (if referenced), public key, encrypt, create |
//! | secret update | folders (if referenced), update, move (if folder changed) |

pub mod cipher;
pub mod config;
pub mod error;
pub mod folder;
pub mod secret;

pub use cipher::SecretCipher;
pub use config::ReconcileConfig;
pub use error::{ReconcileError, Result};
pub use folder::FolderReconciler;
pub use secret::SecretReconciler;
