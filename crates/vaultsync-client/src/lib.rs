//! # Vaultsync Client
//!
//! The seam between vaultsync and a credential vault.
//!
//! ## Key Types
//!
//! - [`VaultClient`] - async trait every reconciler is generic over
//! - [`CancelSignal`] - cooperative cancellation threaded to each call
//! - [`ClientError`] - what a vault call can fail with
//! - [`MemoryVault`] - in-memory vault for tests, with a call journal
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vaultsync_client::{CancelSignal, MemoryVault, VaultClient};
//! use vaultsync_core::NewFolder;
//!
//! async fn example() {
//!     let vault = MemoryVault::new();
//!     let cancel = CancelSignal::never();
//!     let folder = NewFolder { name: "ops".into(), folder_parent_id: None };
//!     let created = cancel.run(vault.create_folder(&folder)).await.unwrap();
//!     assert!(!created.id.is_empty());
//! }
//! ```

pub mod cancel;
pub mod crypto;
pub mod error;
pub mod memory;
pub mod traits;

pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use crypto::VaultKeyPair;
pub use error::{ClientError, Result};
pub use memory::{Grant, MemoryVault, VaultCall};
pub use traits::VaultClient;
