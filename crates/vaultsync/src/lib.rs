//! # Vaultsync
//!
//! Reconcile folders, password secrets and share grants against a
//! credential vault.
//!
//! ## Overview
//!
//! The host (a declarative configuration framework) owns parsing and state
//! persistence. It hands vaultsync a descriptor of what it wants and the
//! record of what it last saw; vaultsync issues the minimal sequence of vault
//! calls to converge the two and returns the record to persist.
//!
//! - **Folders**: create, refresh, move-then-update, delete
//! - **Secrets**: resolve type and folder, encrypt through the vault, submit
//! - **Shares**: revoke-then-grant, with partial application reported
//! - **Data sources**: read a folder or decrypted secret by ID
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vaultsync::{Orchestrator, VaultsyncConfig};
//! use vaultsync::client::{CancelSignal, MemoryVault};
//! use vaultsync::core::{FolderDescriptor, ShareDescriptor, TargetKind};
//!
//! async fn example() {
//!     let vault = MemoryVault::new();
//!     let ops = vault.add_group("Ops");
//!     let orchestrator = Orchestrator::new(vault, VaultsyncConfig::default());
//!     let cancel = CancelSignal::never();
//!
//!     let folder = orchestrator
//!         .create_folder(
//!             FolderDescriptor { name: Some("infra".into()), folder_parent_id: None },
//!             &cancel,
//!         )
//!         .await
//!         .unwrap();
//!
//!     let share = ShareDescriptor {
//!         target_id: Some(folder.id.clone()),
//!         share_group_id: Some(ops.id),
//!         share_group_name: None,
//!         modify: Some(true),
//!     };
//!     orchestrator
//!         .create_share(TargetKind::Folder, share, &cancel)
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `vaultsync::core` - data model, descriptors, resolver
//! - `vaultsync::client` - `VaultClient`, `CancelSignal`, `MemoryVault`
//! - `vaultsync::perms` - share reconciliation
//! - `vaultsync::reconcile` - folder and secret reconciliation

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod record;

// Re-export component crates
pub use vaultsync_client as client;
pub use vaultsync_core as core;
pub use vaultsync_perms as perms;
pub use vaultsync_reconcile as reconcile;

pub use config::VaultsyncConfig;
pub use error::{Cause, ConfigError, EntityKind, ErrorClass, Operation, OrchestratorError, Result};
pub use orchestrator::Orchestrator;
pub use record::{share_key, FolderRecord, SecretData, SecretRecord, ShareRecord};
