//! The Orchestrator: entry point for every lifecycle operation.
//!
//! The host hands over descriptors and the records it persisted last time.
//! The orchestrator validates descriptors before any remote call, dispatches
//! to the matching reconciler and returns the record to persist next.

use std::sync::Arc;

use tracing::debug;

use vaultsync_client::{CancelSignal, VaultClient};
use vaultsync_core::{
    FolderDescriptor, SecretDescriptor, ShareDescriptor, SubjectRef, TargetKind,
};
use vaultsync_perms::{PermissionReconciler, ShareTarget};
use vaultsync_reconcile::{FolderReconciler, SecretReconciler};

use crate::config::VaultsyncConfig;
use crate::error::{Cause, EntityKind, Operation, OrchestratorError, Result};
use crate::record::{FolderRecord, SecretData, SecretRecord, ShareRecord};

/// Drives folders, secrets and shares through their lifecycle.
pub struct Orchestrator<V> {
    client: Arc<V>,
    config: VaultsyncConfig,
    folders: FolderReconciler<Arc<V>>,
    secrets: SecretReconciler<Arc<V>>,
    perms: PermissionReconciler<Arc<V>>,
}

impl<V: VaultClient> Orchestrator<V> {
    pub fn new(client: V, config: VaultsyncConfig) -> Self {
        Self::with_shared(Arc::new(client), config)
    }

    /// Build on a client the caller keeps a handle to.
    pub fn with_shared(client: Arc<V>, config: VaultsyncConfig) -> Self {
        Self {
            folders: FolderReconciler::new(Arc::clone(&client), config.reconcile.clone()),
            secrets: SecretReconciler::new(Arc::clone(&client), config.reconcile.clone()),
            perms: PermissionReconciler::new(Arc::clone(&client)),
            client,
            config,
        }
    }

    pub fn client(&self) -> &V {
        &self.client
    }

    pub fn config(&self) -> &VaultsyncConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Folders
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_folder(
        &self,
        desired: FolderDescriptor,
        cancel: &CancelSignal,
    ) -> Result<FolderRecord> {
        let scope = Scope(EntityKind::Folder, Operation::Create);
        let spec = desired.validate().map_err(|e| scope.fail(e))?;
        let folder = self.folders.create(&spec, cancel).await.map_err(|e| scope.fail(e))?;
        Ok(folder.into())
    }

    /// Refresh a folder record from the vault.
    pub async fn read_folder(
        &self,
        record: &FolderRecord,
        cancel: &CancelSignal,
    ) -> Result<FolderRecord> {
        let folder = self
            .folders
            .read(&record.id, cancel)
            .await
            .map_err(|e| Scope(EntityKind::Folder, Operation::Read).fail(e))?;
        Ok(folder.into())
    }

    pub async fn update_folder(
        &self,
        desired: FolderDescriptor,
        observed: &FolderRecord,
        cancel: &CancelSignal,
    ) -> Result<FolderRecord> {
        let scope = Scope(EntityKind::Folder, Operation::Update);
        let spec = desired.validate().map_err(|e| scope.fail(e))?;
        self.folders
            .update(&observed.id, &spec, &observed.as_folder(), cancel)
            .await
            .map_err(|e| scope.fail(e))?;

        Ok(FolderRecord {
            id: observed.id.clone(),
            name: spec.name,
            folder_parent_id: spec.parent_id,
        })
    }

    pub async fn delete_folder(&self, observed: &FolderRecord, cancel: &CancelSignal) -> Result<()> {
        self.folders
            .delete(&observed.id, cancel)
            .await
            .map_err(|e| Scope(EntityKind::Folder, Operation::Delete).fail(e))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Secrets
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_secret(
        &self,
        desired: SecretDescriptor,
        cancel: &CancelSignal,
    ) -> Result<SecretRecord> {
        let scope = Scope(EntityKind::Secret, Operation::Create);
        let spec = desired.validate().map_err(|e| scope.fail(e))?;
        let resource = self.secrets.create(&spec, cancel).await.map_err(|e| scope.fail(e))?;

        Ok(SecretRecord {
            id: resource.id,
            name: spec.name,
            username: spec.username,
            uri: spec.uri,
            folder_parent: spec.folder_parent,
            folder_parent_id: resource.folder_parent_id,
            password: spec.password,
            description: spec.description,
            resource_type_id: resource.resource_type_id,
        })
    }

    /// Refresh a secret record from the vault, including the decrypted password.
    pub async fn read_secret(
        &self,
        record: &SecretRecord,
        cancel: &CancelSignal,
    ) -> Result<SecretRecord> {
        let remote = self
            .secrets
            .read(&record.id, cancel)
            .await
            .map_err(|e| Scope(EntityKind::Secret, Operation::Read).fail(e))?;
        Ok(record.clone().refresh(remote))
    }

    pub async fn update_secret(
        &self,
        desired: SecretDescriptor,
        observed: &SecretRecord,
        cancel: &CancelSignal,
    ) -> Result<SecretRecord> {
        let scope = Scope(EntityKind::Secret, Operation::Update);
        let spec = desired.validate().map_err(|e| scope.fail(e))?;
        let folder_parent_id = self
            .secrets
            .update(
                &observed.id,
                &spec,
                observed.folder_parent_id.as_deref(),
                cancel,
            )
            .await
            .map_err(|e| scope.fail(e))?;

        Ok(SecretRecord {
            id: observed.id.clone(),
            name: spec.name,
            username: spec.username,
            uri: spec.uri,
            folder_parent: spec.folder_parent,
            folder_parent_id,
            password: spec.password,
            description: spec.description,
            resource_type_id: observed.resource_type_id.clone(),
        })
    }

    pub async fn delete_secret(&self, observed: &SecretRecord, cancel: &CancelSignal) -> Result<()> {
        self.secrets
            .delete(&observed.id, cancel)
            .await
            .map_err(|e| Scope(EntityKind::Secret, Operation::Delete).fail(e))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shares
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant a group access to a folder or resource.
    ///
    /// An empty `share_group_id` creates the record without any share call.
    pub async fn create_share(
        &self,
        target_kind: TargetKind,
        desired: ShareDescriptor,
        cancel: &CancelSignal,
    ) -> Result<ShareRecord> {
        let scope = Scope(share_entity(target_kind), Operation::Create);
        let spec = desired.validate(target_kind).map_err(|e| scope.fail(e))?;
        let group_id = self
            .perms
            .resolve_subject(&spec.subject, cancel)
            .await
            .map_err(|e| scope.fail(e))?;

        let target = ShareTarget::new(target_kind, spec.target_id.clone());
        self.perms
            .create(&target, group_id.as_deref(), spec.level(), cancel)
            .await
            .map_err(|e| scope.fail(e))?;

        Ok(ShareRecord::new(
            target_kind,
            spec.target_id,
            group_id,
            group_name(&spec.subject),
            spec.modify,
        ))
    }

    /// Shares cannot be read back from the vault; the record is kept as is.
    pub fn read_share(&self, record: &ShareRecord) -> ShareRecord {
        debug!(share_id = %record.id, "share has no remote read");
        self.perms.read(record.clone())
    }

    /// Revoke the observed grant, then apply the desired one.
    ///
    /// The record ID is re-derived from the new target and group.
    pub async fn update_share(
        &self,
        desired: ShareDescriptor,
        observed: &ShareRecord,
        cancel: &CancelSignal,
    ) -> Result<ShareRecord> {
        let target_kind = observed.target_kind;
        let scope = Scope(share_entity(target_kind), Operation::Update);
        let spec = desired.validate(target_kind).map_err(|e| scope.fail(e))?;
        let group_id = self
            .perms
            .resolve_subject(&spec.subject, cancel)
            .await
            .map_err(|e| scope.fail(e))?;

        let old_target = ShareTarget::new(target_kind, observed.target_id.clone());
        let new_target = ShareTarget::new(target_kind, spec.target_id.clone());
        self.perms
            .update(
                &old_target,
                observed.subject(),
                &new_target,
                group_id.as_deref(),
                spec.level(),
                cancel,
            )
            .await
            .map_err(|e| scope.fail(e))?;

        Ok(ShareRecord::new(
            target_kind,
            spec.target_id,
            group_id,
            group_name(&spec.subject),
            spec.modify,
        ))
    }

    pub async fn delete_share(&self, observed: &ShareRecord, cancel: &CancelSignal) -> Result<()> {
        let target = ShareTarget::new(observed.target_kind, observed.target_id.clone());
        self.perms
            .delete(&target, observed.subject(), cancel)
            .await
            .map_err(|e| Scope(share_entity(observed.target_kind), Operation::Delete).fail(e))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Data sources
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up a folder by ID without managing it.
    pub async fn folder_data(&self, id: &str, cancel: &CancelSignal) -> Result<FolderRecord> {
        let folder = self
            .folders
            .read(id, cancel)
            .await
            .map_err(|e| Scope(EntityKind::FolderData, Operation::Read).fail(e))?;
        Ok(folder.into())
    }

    /// Look up a secret by ID, decrypted, without managing it.
    pub async fn secret_data(&self, id: &str, cancel: &CancelSignal) -> Result<SecretData> {
        let remote = self
            .secrets
            .read(id, cancel)
            .await
            .map_err(|e| Scope(EntityKind::SecretData, Operation::Read).fail(e))?;
        Ok(SecretData::new(id, remote))
    }
}

/// Entity kind and operation attached to every error of one call.
#[derive(Clone, Copy)]
struct Scope(EntityKind, Operation);

impl Scope {
    fn fail(self, source: impl Into<Cause>) -> OrchestratorError {
        OrchestratorError::new(self.0, self.1, source)
    }
}

fn share_entity(target_kind: TargetKind) -> EntityKind {
    match target_kind {
        TargetKind::Folder => EntityKind::FolderShare,
        TargetKind::Resource => EntityKind::ResourceShare,
    }
}

fn group_name(subject: &SubjectRef) -> Option<String> {
    match subject {
        SubjectRef::GroupName(name) => Some(name.clone()),
        _ => None,
    }
}
