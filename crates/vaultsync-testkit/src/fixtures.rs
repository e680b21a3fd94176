//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::{Arc, Once};

use vaultsync::{Orchestrator, VaultsyncConfig};
use vaultsync_client::{CancelSignal, MemoryVault};
use vaultsync_core::{FolderDescriptor, Group, SecretDescriptor, ShareDescriptor};

/// An orchestrator over a fresh in-memory vault, with the vault kept in reach.
pub struct TestVault {
    pub vault: Arc<MemoryVault>,
    pub orchestrator: Orchestrator<MemoryVault>,
    pub cancel: CancelSignal,
}

impl TestVault {
    pub fn new() -> Self {
        Self::with_config(VaultsyncConfig::default())
    }

    pub fn with_config(config: VaultsyncConfig) -> Self {
        let vault = Arc::new(MemoryVault::new());
        Self {
            orchestrator: Orchestrator::with_shared(Arc::clone(&vault), config),
            vault,
            cancel: CancelSignal::never(),
        }
    }

    /// Seed a group directly on the vault.
    pub fn group(&self, name: &str) -> Group {
        self.vault.add_group(name)
    }
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}

pub fn folder(name: &str, parent: Option<&str>) -> FolderDescriptor {
    FolderDescriptor {
        name: Some(name.to_string()),
        folder_parent_id: parent.map(str::to_string),
    }
}

/// A complete secret descriptor with placeholder username and URI.
pub fn secret(name: &str, password: &str) -> SecretDescriptor {
    SecretDescriptor {
        name: Some(name.to_string()),
        username: Some(format!("{name}-user")),
        uri: Some(format!("https://{name}.example.internal")),
        folder_parent: None,
        password: Some(password.to_string()),
        description: Some(format!("{name} credentials")),
    }
}

/// Share by group ID. An empty ID means no grant.
pub fn share(target_id: &str, group_id: &str, modify: bool) -> ShareDescriptor {
    ShareDescriptor {
        target_id: Some(target_id.to_string()),
        share_group_id: Some(group_id.to_string()),
        share_group_name: None,
        modify: Some(modify),
    }
}

/// Share by group name.
pub fn share_named(target_id: &str, group_name: &str, modify: bool) -> ShareDescriptor {
    ShareDescriptor {
        target_id: Some(target_id.to_string()),
        share_group_id: None,
        share_group_name: Some(group_name.to_string()),
        modify: Some(modify),
    }
}

/// Install a test-writer subscriber once per process. Honors `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}
