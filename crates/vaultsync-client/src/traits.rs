//! VaultClient trait: the interface reconcilers call into.
//!
//! Everything behind this trait (HTTP transport, authentication, wire
//! serialization) belongs to the host. Reconcilers are generic over it and
//! never assume more than what is declared here.

use async_trait::async_trait;

use vaultsync_core::{
    Ciphertext, DecryptedResource, Folder, Group, ListFilter, NewFolder, NewResource, PublicKey,
    Resource, ResourceType, SecretFields, ShareOperation,
};

use crate::error::Result;

/// Async interface to a credential vault.
///
/// Implementations own the session and must be safe for concurrent use;
/// the reconcilers hold no state of their own between calls.
#[async_trait]
pub trait VaultClient: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Folders
    // ─────────────────────────────────────────────────────────────────────────

    async fn get_folder(&self, id: &str) -> Result<Folder>;

    async fn get_folders(&self, filter: &ListFilter) -> Result<Vec<Folder>>;

    /// Create a folder. Returns it with its vault-assigned ID.
    async fn create_folder(&self, folder: &NewFolder) -> Result<Folder>;

    async fn update_folder(&self, id: &str, folder: &NewFolder) -> Result<Folder>;

    /// Re-parent a folder. `None` moves it to the root.
    async fn move_folder(&self, id: &str, new_parent_id: Option<&str>) -> Result<()>;

    async fn delete_folder(&self, id: &str) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Secrets
    // ─────────────────────────────────────────────────────────────────────────

    async fn get_resource_types(&self, filter: &ListFilter) -> Result<Vec<ResourceType>>;

    async fn get_public_key(&self) -> Result<PublicKey>;

    /// Encrypt plaintext for the vault with the given public key.
    fn encrypt(&self, public_key: &PublicKey, plaintext: &str) -> Result<Ciphertext>;

    async fn create_resource(&self, resource: &NewResource) -> Result<Resource>;

    /// Read a resource and decrypt its secret in one call.
    async fn read_decrypted_resource(&self, id: &str) -> Result<DecryptedResource>;

    /// Rewrite a resource's fields; the vault re-encrypts the secret.
    async fn update_resource(&self, id: &str, fields: &SecretFields) -> Result<()>;

    async fn move_resource(&self, id: &str, new_parent_id: Option<&str>) -> Result<()>;

    async fn delete_resource(&self, id: &str) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Sharing
    // ─────────────────────────────────────────────────────────────────────────

    async fn share_folder(&self, id: &str, operations: &[ShareOperation]) -> Result<()>;

    async fn share_resource(&self, id: &str, operations: &[ShareOperation]) -> Result<()>;

    async fn get_groups(&self, filter: &ListFilter) -> Result<Vec<Group>>;
}

#[async_trait]
impl<V: VaultClient + ?Sized> VaultClient for std::sync::Arc<V> {
    async fn get_folder(&self, id: &str) -> Result<Folder> {
        (**self).get_folder(id).await
    }

    async fn get_folders(&self, filter: &ListFilter) -> Result<Vec<Folder>> {
        (**self).get_folders(filter).await
    }

    async fn create_folder(&self, folder: &NewFolder) -> Result<Folder> {
        (**self).create_folder(folder).await
    }

    async fn update_folder(&self, id: &str, folder: &NewFolder) -> Result<Folder> {
        (**self).update_folder(id, folder).await
    }

    async fn move_folder(&self, id: &str, new_parent_id: Option<&str>) -> Result<()> {
        (**self).move_folder(id, new_parent_id).await
    }

    async fn delete_folder(&self, id: &str) -> Result<()> {
        (**self).delete_folder(id).await
    }

    async fn get_resource_types(&self, filter: &ListFilter) -> Result<Vec<ResourceType>> {
        (**self).get_resource_types(filter).await
    }

    async fn get_public_key(&self) -> Result<PublicKey> {
        (**self).get_public_key().await
    }

    fn encrypt(&self, public_key: &PublicKey, plaintext: &str) -> Result<Ciphertext> {
        (**self).encrypt(public_key, plaintext)
    }

    async fn create_resource(&self, resource: &NewResource) -> Result<Resource> {
        (**self).create_resource(resource).await
    }

    async fn read_decrypted_resource(&self, id: &str) -> Result<DecryptedResource> {
        (**self).read_decrypted_resource(id).await
    }

    async fn update_resource(&self, id: &str, fields: &SecretFields) -> Result<()> {
        (**self).update_resource(id, fields).await
    }

    async fn move_resource(&self, id: &str, new_parent_id: Option<&str>) -> Result<()> {
        (**self).move_resource(id, new_parent_id).await
    }

    async fn delete_resource(&self, id: &str) -> Result<()> {
        (**self).delete_resource(id).await
    }

    async fn share_folder(&self, id: &str, operations: &[ShareOperation]) -> Result<()> {
        (**self).share_folder(id, operations).await
    }

    async fn share_resource(&self, id: &str, operations: &[ShareOperation]) -> Result<()> {
        (**self).share_resource(id, operations).await
    }

    async fn get_groups(&self, filter: &ListFilter) -> Result<Vec<Group>> {
        (**self).get_groups(filter).await
    }
}
