//! # Vaultsync Testkit
//!
//! Testing utilities for vaultsync.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: an orchestrator over a fresh [`MemoryVault`](vaultsync_client::MemoryVault)
//!   and descriptor builders
//! - **Generators**: proptest strategies for descriptors, listings and folder trees
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use vaultsync_testkit::fixtures::{folder, TestVault};
//!
//! async fn example() {
//!     let t = TestVault::new();
//!     let record = t.orchestrator.create_folder(folder("ops", None), &t.cancel).await.unwrap();
//!     assert!(t.vault.folder(&record.id).is_some());
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use vaultsync_testkit::generators::secret_descriptor;
//!
//! proptest! {
//!     #[test]
//!     fn secrets_validate(descriptor in secret_descriptor()) {
//!         prop_assert!(descriptor.validate().is_ok());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{folder, init_tracing, secret, share, share_named, TestVault};
