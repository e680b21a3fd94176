//! SecretReconciler: password resources, their encryption and placement.

use tracing::{debug, info, warn};

use vaultsync_client::{CancelSignal, VaultClient};
use vaultsync_core::{
    resolve_folder_id, resolve_resource_type_id, DecryptedResource, ListFilter, LookupKind,
    NewResource, Resource, SecretEntry, SecretFields, SecretSpec,
};

use crate::cipher::SecretCipher;
use crate::config::ReconcileConfig;
use crate::error::{ReconcileError, Result};

/// Reconciles secret resources against a vault.
pub struct SecretReconciler<V> {
    client: V,
    config: ReconcileConfig,
}

impl<V: VaultClient> SecretReconciler<V> {
    pub fn new(client: V, config: ReconcileConfig) -> Self {
        Self { client, config }
    }

    /// Create a secret resource.
    ///
    /// Lookups run before the secret is encrypted, so a bad reference
    /// creates nothing. The returned resource carries the assigned ID and
    /// resource type.
    pub async fn create(&self, desired: &SecretSpec, cancel: &CancelSignal) -> Result<Resource> {
        let resource_type_id = self.resource_type_id(cancel).await?;
        let folder_parent_id = self
            .resolve_folder(desired.folder_parent.as_deref(), cancel)
            .await?;

        let sealed = SecretCipher::new(&self.client)
            .encrypt(&desired.password, cancel)
            .await?;

        let request = NewResource {
            name: desired.name.clone(),
            username: desired.username.clone(),
            uri: desired.uri.clone(),
            description: desired.description.clone(),
            resource_type_id,
            folder_parent_id,
            secrets: vec![SecretEntry { data: sealed }],
        };
        debug!(name = %request.name, folder = ?request.folder_parent_id, "creating resource");
        let resource = cancel
            .run(self.client.create_resource(&request))
            .await
            .map_err(|e| ReconcileError::remote("create_resource", e))?;

        info!(resource_id = %resource.id, name = %resource.name, "secret created");
        Ok(resource)
    }

    /// Read a resource with its decrypted secret.
    pub async fn read(&self, id: &str, cancel: &CancelSignal) -> Result<DecryptedResource> {
        debug!(resource_id = %id, "reading resource");
        cancel
            .run(self.client.read_decrypted_resource(id))
            .await
            .map_err(|e| ReconcileError::read("read_decrypted_resource", e))
    }

    /// Converge an existing resource onto `desired`.
    ///
    /// Fields are rewritten first, then the resource is moved if its folder
    /// changed. A failed move leaves the field update in place and reports
    /// `move_resource` as the failed call. Returns the resolved folder ID.
    pub async fn update(
        &self,
        id: &str,
        desired: &SecretSpec,
        observed_folder_id: Option<&str>,
        cancel: &CancelSignal,
    ) -> Result<Option<String>> {
        let folder_parent_id = self
            .resolve_folder(desired.folder_parent.as_deref(), cancel)
            .await?;

        let fields = SecretFields {
            name: desired.name.clone(),
            username: desired.username.clone(),
            uri: desired.uri.clone(),
            secret: desired.password.clone(),
            description: desired.description.clone(),
        };
        debug!(resource_id = %id, "updating resource");
        cancel
            .run(self.client.update_resource(id, &fields))
            .await
            .map_err(|e| ReconcileError::remote("update_resource", e))?;

        if folder_parent_id.as_deref() != observed_folder_id {
            debug!(resource_id = %id, from = ?observed_folder_id, to = ?folder_parent_id, "moving resource");
            cancel
                .run(self.client.move_resource(id, folder_parent_id.as_deref()))
                .await
                .map_err(|e| {
                    warn!(resource_id = %id, error = %e, "move failed after field update");
                    ReconcileError::remote("move_resource", e)
                })?;
        }

        info!(resource_id = %id, "secret updated");
        Ok(folder_parent_id)
    }

    /// Delete a resource. Errors are surfaced as-is, never retried.
    pub async fn delete(&self, id: &str, cancel: &CancelSignal) -> Result<()> {
        debug!(resource_id = %id, "deleting resource");
        cancel
            .run(self.client.delete_resource(id))
            .await
            .map_err(|e| ReconcileError::remote("delete_resource", e))?;

        info!(resource_id = %id, "secret deleted");
        Ok(())
    }

    async fn resource_type_id(&self, cancel: &CancelSignal) -> Result<String> {
        let slug = &self.config.resource_type_slug;
        let types = cancel
            .run(self.client.get_resource_types(&ListFilter::all()))
            .await
            .map_err(|e| ReconcileError::remote("get_resource_types", e))?;

        let resolution = resolve_resource_type_id(&types, slug);
        if resolution.is_ambiguous() {
            warn!(slug = %slug, "resource type slug is ambiguous, using the last match");
        }
        Ok(resolution.require(LookupKind::ResourceType, slug)?)
    }

    /// Resolve a folder name or ID. An unset reference means no folder.
    async fn resolve_folder(
        &self,
        reference: Option<&str>,
        cancel: &CancelSignal,
    ) -> Result<Option<String>> {
        let Some(reference) = reference else {
            return Ok(None);
        };

        let folders = cancel
            .run(self.client.get_folders(&ListFilter::all()))
            .await
            .map_err(|e| ReconcileError::remote("get_folders", e))?;

        let resolution = resolve_folder_id(&folders, reference);
        if resolution.is_ambiguous() {
            warn!(folder = %reference, "folder reference is ambiguous, using the last match");
        }
        Ok(Some(resolution.require(LookupKind::Folder, reference)?))
    }
}
