//! FolderReconciler: folder lifecycle and hierarchy moves.

use tracing::{debug, info};

use vaultsync_client::{CancelSignal, VaultClient};
use vaultsync_core::{check_folder_move, Folder, FolderSpec, ListFilter, NewFolder};

use crate::config::ReconcileConfig;
use crate::error::{ReconcileError, Result};

/// Reconciles folders against a vault.
pub struct FolderReconciler<V> {
    client: V,
    config: ReconcileConfig,
}

impl<V: VaultClient> FolderReconciler<V> {
    pub fn new(client: V, config: ReconcileConfig) -> Self {
        Self { client, config }
    }

    /// Create a folder. One call; the returned folder carries the vault's ID.
    pub async fn create(&self, desired: &FolderSpec, cancel: &CancelSignal) -> Result<Folder> {
        let request = NewFolder {
            name: desired.name.clone(),
            folder_parent_id: desired.parent_id.clone(),
        };
        debug!(name = %request.name, parent = ?request.folder_parent_id, "creating folder");
        let folder = cancel
            .run(self.client.create_folder(&request))
            .await
            .map_err(|e| ReconcileError::remote("create_folder", e))?;

        info!(folder_id = %folder.id, name = %folder.name, "folder created");
        Ok(folder)
    }

    /// Full refresh from the vault.
    pub async fn read(&self, id: &str, cancel: &CancelSignal) -> Result<Folder> {
        debug!(folder_id = %id, "reading folder");
        cancel
            .run(self.client.get_folder(id))
            .await
            .map_err(|e| ReconcileError::read("get_folder", e))
    }

    /// Converge `observed` onto `desired`.
    ///
    /// A parent change is issued as a move first; the field update always
    /// follows. A failed move stops before the update.
    pub async fn update(
        &self,
        id: &str,
        desired: &FolderSpec,
        observed: &Folder,
        cancel: &CancelSignal,
    ) -> Result<Folder> {
        let new_parent = desired.parent_id.as_deref();

        if new_parent != observed.folder_parent_id.as_deref() {
            if self.config.validate_folder_moves {
                self.check_move(id, new_parent, cancel).await?;
            }

            debug!(folder_id = %id, from = ?observed.folder_parent_id, to = ?new_parent, "moving folder");
            cancel
                .run(self.client.move_folder(id, new_parent))
                .await
                .map_err(|e| ReconcileError::remote("move_folder", e))?;
        }

        let request = NewFolder {
            name: desired.name.clone(),
            folder_parent_id: desired.parent_id.clone(),
        };
        debug!(folder_id = %id, name = %request.name, "updating folder");
        let folder = cancel
            .run(self.client.update_folder(id, &request))
            .await
            .map_err(|e| ReconcileError::remote("update_folder", e))?;

        info!(folder_id = %id, "folder updated");
        Ok(folder)
    }

    /// Delete a folder. Errors are surfaced as-is, never retried.
    pub async fn delete(&self, id: &str, cancel: &CancelSignal) -> Result<()> {
        debug!(folder_id = %id, "deleting folder");
        cancel
            .run(self.client.delete_folder(id))
            .await
            .map_err(|e| ReconcileError::remote("delete_folder", e))?;

        info!(folder_id = %id, "folder deleted");
        Ok(())
    }

    async fn check_move(
        &self,
        id: &str,
        new_parent: Option<&str>,
        cancel: &CancelSignal,
    ) -> Result<()> {
        let folders = cancel
            .run(self.client.get_folders(&ListFilter::all()))
            .await
            .map_err(|e| ReconcileError::remote("get_folders", e))?;
        check_folder_move(&folders, id, new_parent)?;
        Ok(())
    }
}
