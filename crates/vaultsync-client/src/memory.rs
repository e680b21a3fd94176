//! In-memory implementation of the VaultClient trait.
//!
//! This is primarily for testing. It behaves like a vault for everything the
//! reconcilers depend on: assigned IDs, folder parents, resource types,
//! groups, per-target permissions and genuine sealed-box encryption. Every
//! call is appended to a journal so tests can assert on ordering, and
//! individual calls can be made to fail on demand.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use vaultsync_core::{
    Ciphertext, DecryptedResource, Folder, Group, ListFilter, NewFolder, NewResource,
    PermissionLevel, PublicKey, Resource, ResourceType, SecretEntry, SecretFields,
    ShareOperation, SubjectKind, TargetKind, PASSWORD_AND_DESCRIPTION,
};

use crate::crypto::{seal, VaultKeyPair};
use crate::error::{ClientError, Result};
use crate::traits::VaultClient;

/// One call received by a [`MemoryVault`], in the order it arrived.
///
/// `Encrypt` keeps the plaintext so tests can check what was sealed. This
/// journal only exists in the in-memory vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultCall {
    GetFolder { id: String },
    GetFolders { filter: ListFilter },
    CreateFolder { name: String, folder_parent_id: Option<String> },
    UpdateFolder { id: String, name: String, folder_parent_id: Option<String> },
    MoveFolder { id: String, new_parent_id: Option<String> },
    DeleteFolder { id: String },
    GetResourceTypes { filter: ListFilter },
    GetPublicKey,
    Encrypt { public_key: PublicKey, plaintext: String },
    CreateResource { resource: NewResource },
    ReadDecryptedResource { id: String },
    UpdateResource { id: String, name: String },
    MoveResource { id: String, new_parent_id: Option<String> },
    DeleteResource { id: String },
    ShareFolder { id: String, operations: Vec<ShareOperation> },
    ShareResource { id: String, operations: Vec<ShareOperation> },
    GetGroups { filter: ListFilter },
}

impl VaultCall {
    /// Whether this is a share call carrying at least one non-revoke entry.
    pub fn is_grant(&self) -> bool {
        self.share_operations()
            .map(|ops| ops.iter().any(|op| !op.is_revoke()))
            .unwrap_or(false)
    }

    /// Whether this is a share call carrying at least one revoke entry.
    pub fn is_revoke(&self) -> bool {
        self.share_operations()
            .map(|ops| ops.iter().any(ShareOperation::is_revoke))
            .unwrap_or(false)
    }

    pub fn is_share(&self) -> bool {
        self.share_operations().is_some()
    }

    fn share_operations(&self) -> Option<&[ShareOperation]> {
        match self {
            VaultCall::ShareFolder { operations, .. }
            | VaultCall::ShareResource { operations, .. } => Some(operations),
            _ => None,
        }
    }
}

type FaultPredicate = Box<dyn Fn(&VaultCall) -> bool + Send + Sync>;

struct Fault {
    predicate: FaultPredicate,
    error: ClientError,
}

/// A permission held by one subject on one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub subject_kind: SubjectKind,
    pub subject_id: String,
    pub level: PermissionLevel,
}

/// In-memory vault.
///
/// All data is lost when the vault is dropped. Thread-safe via RwLock.
pub struct MemoryVault {
    inner: RwLock<MemoryVaultInner>,
    keys: VaultKeyPair,
}

struct MemoryVaultInner {
    /// Folders indexed by ID.
    folders: BTreeMap<String, Folder>,

    /// Resources indexed by ID.
    resources: BTreeMap<String, Resource>,

    /// Resource types in listing order.
    resource_types: Vec<ResourceType>,

    /// Groups in listing order.
    groups: Vec<Group>,

    /// Permissions: target -> (subject kind, subject id) -> level.
    permissions: HashMap<(TargetKind, String), BTreeMap<(SubjectKind, String), PermissionLevel>>,

    journal: Vec<VaultCall>,

    faults: Vec<Fault>,

    next_id: u64,
}

impl MemoryVaultInner {
    fn assign_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{:04}", self.next_id)
    }

    /// Journal the call, then fail it if a fault matches.
    fn record(&mut self, call: VaultCall) -> Result<()> {
        let fault = self
            .faults
            .iter()
            .find(|fault| (fault.predicate)(&call))
            .map(|fault| fault.error.clone());
        self.journal.push(call);
        match fault {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn require_folder(&self, id: &str) -> Result<&Folder> {
        self.folders
            .get(id)
            .ok_or_else(|| ClientError::not_found("folder", id))
    }

    fn require_parent(&self, parent: Option<&str>) -> Result<()> {
        match parent {
            Some(parent) if !self.folders.contains_key(parent) => Err(ClientError::Rejected(
                format!("parent folder {parent} does not exist"),
            )),
            _ => Ok(()),
        }
    }

    fn apply_share(
        &mut self,
        target_kind: TargetKind,
        target_id: &str,
        operations: &[ShareOperation],
    ) -> Result<()> {
        for op in operations {
            if !op.is_revoke() && !self.group_exists(op.aro, &op.aro_id) {
                return Err(ClientError::Rejected(format!(
                    "{} {} does not exist",
                    op.aro, op.aro_id
                )));
            }
        }

        let table = self
            .permissions
            .entry((target_kind, target_id.to_string()))
            .or_default();
        for op in operations {
            let key = (op.aro, op.aro_id.clone());
            if op.is_revoke() {
                table.remove(&key);
            } else {
                table.insert(key, op.level);
            }
        }
        Ok(())
    }

    /// Only groups are seeded, so a user subject never exists.
    fn group_exists(&self, kind: SubjectKind, id: &str) -> bool {
        kind == SubjectKind::Group && self.groups.iter().any(|g| g.id == id)
    }
}

impl MemoryVault {
    /// Create a vault seeded with the standard resource types.
    pub fn new() -> Self {
        Self::with_keys(VaultKeyPair::generate())
    }

    /// Create a vault with a fixed key pair.
    pub fn with_keys(keys: VaultKeyPair) -> Self {
        let vault = Self {
            inner: RwLock::new(MemoryVaultInner {
                folders: BTreeMap::new(),
                resources: BTreeMap::new(),
                resource_types: Vec::new(),
                groups: Vec::new(),
                permissions: HashMap::new(),
                journal: Vec::new(),
                faults: Vec::new(),
                next_id: 0,
            }),
            keys,
        };
        vault.add_resource_type("password-string", "Simple password");
        vault.add_resource_type(PASSWORD_AND_DESCRIPTION, "Password with description");
        vault.add_resource_type("totp", "Standalone TOTP");
        vault
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Seeding
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_group(&self, name: impl Into<String>) -> Group {
        let mut inner = self.inner.write().unwrap();
        let group = Group {
            id: inner.assign_id("group"),
            name: name.into(),
        };
        inner.groups.push(group.clone());
        group
    }

    /// Add a resource type. Slugs are not required to be unique.
    pub fn add_resource_type(&self, slug: impl Into<String>, name: impl Into<String>) -> ResourceType {
        let mut inner = self.inner.write().unwrap();
        let resource_type = ResourceType {
            id: inner.assign_id("rtype"),
            slug: slug.into(),
            name: name.into(),
        };
        inner.resource_types.push(resource_type.clone());
        resource_type
    }

    /// Insert a folder directly, bypassing the journal.
    pub fn add_folder(&self, name: impl Into<String>, parent: Option<&str>) -> Folder {
        let mut inner = self.inner.write().unwrap();
        let folder = Folder {
            id: inner.assign_id("folder"),
            name: name.into(),
            folder_parent_id: parent.map(str::to_string),
        };
        inner.folders.insert(folder.id.clone(), folder.clone());
        folder
    }

    /// Make every call matching `predicate` fail with `error`.
    ///
    /// The call is still journaled. Faults are checked in registration order.
    pub fn fail_when<P>(&self, predicate: P, error: ClientError)
    where
        P: Fn(&VaultCall) -> bool + Send + Sync + 'static,
    {
        let mut inner = self.inner.write().unwrap();
        inner.faults.push(Fault {
            predicate: Box::new(predicate),
            error,
        });
    }

    pub fn clear_faults(&self) {
        self.inner.write().unwrap().faults.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────

    /// Every call received so far.
    pub fn calls(&self) -> Vec<VaultCall> {
        self.inner.read().unwrap().journal.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.write().unwrap().journal.clear();
    }

    pub fn folder(&self, id: &str) -> Option<Folder> {
        self.inner.read().unwrap().folders.get(id).cloned()
    }

    pub fn resource(&self, id: &str) -> Option<Resource> {
        self.inner.read().unwrap().resources.get(id).cloned()
    }

    pub fn folder_count(&self) -> usize {
        self.inner.read().unwrap().folders.len()
    }

    pub fn resource_count(&self) -> usize {
        self.inner.read().unwrap().resources.len()
    }

    /// Current grants on a target, ordered by subject.
    pub fn permissions_for(&self, target_kind: TargetKind, target_id: &str) -> Vec<Grant> {
        let inner = self.inner.read().unwrap();
        inner
            .permissions
            .get(&(target_kind, target_id.to_string()))
            .map(|table| {
                table
                    .iter()
                    .map(|((kind, id), level)| Grant {
                        subject_kind: *kind,
                        subject_id: id.clone(),
                        level: *level,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The public key this vault hands out.
    pub fn public_key(&self) -> PublicKey {
        self.keys.public_key()
    }

    fn decrypt_first(&self, resource: &Resource) -> Result<String> {
        let entry = resource
            .secrets
            .first()
            .ok_or_else(|| ClientError::Decryption(format!("resource {} has no secret", resource.id)))?;
        self.keys.open(&entry.data)
    }
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VaultClient for MemoryVault {
    async fn get_folder(&self, id: &str) -> Result<Folder> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::GetFolder { id: id.to_string() })?;
        inner.require_folder(id).cloned()
    }

    async fn get_folders(&self, filter: &ListFilter) -> Result<Vec<Folder>> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::GetFolders {
            filter: filter.clone(),
        })?;
        Ok(inner
            .folders
            .values()
            .filter(|f| filter.matches(&f.name))
            .cloned()
            .collect())
    }

    async fn create_folder(&self, folder: &NewFolder) -> Result<Folder> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::CreateFolder {
            name: folder.name.clone(),
            folder_parent_id: folder.folder_parent_id.clone(),
        })?;
        inner.require_parent(folder.folder_parent_id.as_deref())?;

        let created = Folder {
            id: inner.assign_id("folder"),
            name: folder.name.clone(),
            folder_parent_id: folder.folder_parent_id.clone(),
        };
        inner.folders.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_folder(&self, id: &str, folder: &NewFolder) -> Result<Folder> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::UpdateFolder {
            id: id.to_string(),
            name: folder.name.clone(),
            folder_parent_id: folder.folder_parent_id.clone(),
        })?;

        // Only the name is rewritten here; re-parenting goes through move_folder.
        let stored = inner
            .folders
            .get_mut(id)
            .ok_or_else(|| ClientError::not_found("folder", id))?;
        stored.name = folder.name.clone();
        Ok(stored.clone())
    }

    async fn move_folder(&self, id: &str, new_parent_id: Option<&str>) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::MoveFolder {
            id: id.to_string(),
            new_parent_id: new_parent_id.map(str::to_string),
        })?;
        inner.require_folder(id)?;
        inner.require_parent(new_parent_id)?;
        if new_parent_id == Some(id) {
            return Err(ClientError::Rejected(format!(
                "folder {id} cannot be its own parent"
            )));
        }

        if let Some(stored) = inner.folders.get_mut(id) {
            stored.folder_parent_id = new_parent_id.map(str::to_string);
        }
        Ok(())
    }

    async fn delete_folder(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::DeleteFolder { id: id.to_string() })?;
        inner
            .folders
            .remove(id)
            .ok_or_else(|| ClientError::not_found("folder", id))?;

        // Contents fall back to the root.
        for folder in inner.folders.values_mut() {
            if folder.folder_parent_id.as_deref() == Some(id) {
                folder.folder_parent_id = None;
            }
        }
        for resource in inner.resources.values_mut() {
            if resource.folder_parent_id.as_deref() == Some(id) {
                resource.folder_parent_id = None;
            }
        }
        inner
            .permissions
            .remove(&(TargetKind::Folder, id.to_string()));
        Ok(())
    }

    async fn get_resource_types(&self, filter: &ListFilter) -> Result<Vec<ResourceType>> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::GetResourceTypes {
            filter: filter.clone(),
        })?;
        Ok(inner
            .resource_types
            .iter()
            .filter(|t| filter.matches(&t.slug))
            .cloned()
            .collect())
    }

    async fn get_public_key(&self) -> Result<PublicKey> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::GetPublicKey)?;
        Ok(self.keys.public_key())
    }

    fn encrypt(&self, public_key: &PublicKey, plaintext: &str) -> Result<Ciphertext> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::Encrypt {
            public_key: public_key.clone(),
            plaintext: plaintext.to_string(),
        })?;
        drop(inner);
        seal(public_key, plaintext)
    }

    async fn create_resource(&self, resource: &NewResource) -> Result<Resource> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::CreateResource {
            resource: resource.clone(),
        })?;
        inner.require_parent(resource.folder_parent_id.as_deref())?;
        if !inner
            .resource_types
            .iter()
            .any(|t| t.id == resource.resource_type_id)
        {
            return Err(ClientError::Rejected(format!(
                "unknown resource type {}",
                resource.resource_type_id
            )));
        }
        if resource.secrets.len() != 1 {
            return Err(ClientError::Rejected(format!(
                "expected exactly one secret, got {}",
                resource.secrets.len()
            )));
        }

        let created = Resource {
            id: inner.assign_id("resource"),
            name: resource.name.clone(),
            username: resource.username.clone(),
            uri: resource.uri.clone(),
            description: resource.description.clone(),
            resource_type_id: resource.resource_type_id.clone(),
            folder_parent_id: resource.folder_parent_id.clone(),
            secrets: resource.secrets.clone(),
        };
        inner.resources.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn read_decrypted_resource(&self, id: &str) -> Result<DecryptedResource> {
        let resource = {
            let mut inner = self.inner.write().unwrap();
            inner.record(VaultCall::ReadDecryptedResource { id: id.to_string() })?;
            inner
                .resources
                .get(id)
                .cloned()
                .ok_or_else(|| ClientError::not_found("resource", id))?
        };
        let secret = self.decrypt_first(&resource)?;

        Ok(DecryptedResource {
            folder_parent_id: resource.folder_parent_id,
            name: resource.name,
            username: resource.username,
            uri: resource.uri,
            secret,
            description: resource.description,
        })
    }

    async fn update_resource(&self, id: &str, fields: &SecretFields) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::UpdateResource {
            id: id.to_string(),
            name: fields.name.clone(),
        })?;
        if !inner.resources.contains_key(id) {
            return Err(ClientError::not_found("resource", id));
        }

        let sealed = seal(&self.keys.public_key(), &fields.secret)?;
        if let Some(stored) = inner.resources.get_mut(id) {
            stored.name = fields.name.clone();
            stored.username = fields.username.clone();
            stored.uri = fields.uri.clone();
            stored.description = fields.description.clone();
            stored.secrets = vec![SecretEntry { data: sealed }];
        }
        Ok(())
    }

    async fn move_resource(&self, id: &str, new_parent_id: Option<&str>) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::MoveResource {
            id: id.to_string(),
            new_parent_id: new_parent_id.map(str::to_string),
        })?;
        inner.require_parent(new_parent_id)?;
        let stored = inner
            .resources
            .get_mut(id)
            .ok_or_else(|| ClientError::not_found("resource", id))?;
        stored.folder_parent_id = new_parent_id.map(str::to_string);
        Ok(())
    }

    async fn delete_resource(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::DeleteResource { id: id.to_string() })?;
        inner
            .resources
            .remove(id)
            .ok_or_else(|| ClientError::not_found("resource", id))?;
        inner
            .permissions
            .remove(&(TargetKind::Resource, id.to_string()));
        Ok(())
    }

    async fn share_folder(&self, id: &str, operations: &[ShareOperation]) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::ShareFolder {
            id: id.to_string(),
            operations: operations.to_vec(),
        })?;
        inner.require_folder(id)?;
        inner.apply_share(TargetKind::Folder, id, operations)
    }

    async fn share_resource(&self, id: &str, operations: &[ShareOperation]) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::ShareResource {
            id: id.to_string(),
            operations: operations.to_vec(),
        })?;
        if !inner.resources.contains_key(id) {
            return Err(ClientError::not_found("resource", id));
        }
        inner.apply_share(TargetKind::Resource, id, operations)
    }

    async fn get_groups(&self, filter: &ListFilter) -> Result<Vec<Group>> {
        let mut inner = self.inner.write().unwrap();
        inner.record(VaultCall::GetGroups {
            filter: filter.clone(),
        })?;
        Ok(inner
            .groups
            .iter()
            .filter(|g| filter.matches(&g.name))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_folder(name: &str, parent: Option<&str>) -> NewFolder {
        NewFolder {
            name: name.into(),
            folder_parent_id: parent.map(str::to_string),
        }
    }

    async fn sealed_resource(vault: &MemoryVault, secret: &str) -> Resource {
        let types = vault.get_resource_types(&ListFilter::all()).await.unwrap();
        let key = vault.get_public_key().await.unwrap();
        let data = vault.encrypt(&key, secret).unwrap();
        vault
            .create_resource(&NewResource {
                name: "db".into(),
                username: "admin".into(),
                uri: "https://db".into(),
                description: String::new(),
                resource_type_id: types[0].id.clone(),
                folder_parent_id: None,
                secrets: vec![SecretEntry { data }],
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_folder_lifecycle() {
        let vault = MemoryVault::new();
        let parent = vault.create_folder(&new_folder("ops", None)).await.unwrap();
        let child = vault
            .create_folder(&new_folder("db", Some(&parent.id)))
            .await
            .unwrap();
        assert_ne!(parent.id, child.id);

        vault.move_folder(&child.id, None).await.unwrap();
        assert_eq!(vault.get_folder(&child.id).await.unwrap().folder_parent_id, None);

        vault.delete_folder(&child.id).await.unwrap();
        let err = vault.get_folder(&child.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_folder_rejects_unknown_parent() {
        let vault = MemoryVault::new();
        let err = vault
            .create_folder(&new_folder("x", Some("folder-missing")))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Rejected(_)));
        assert_eq!(vault.folder_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let vault = MemoryVault::new();
        assert!(vault.delete_folder("nope").await.unwrap_err().is_not_found());
        assert!(vault.delete_resource("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_resource_decrypts() {
        let vault = MemoryVault::new();
        let resource = sealed_resource(&vault, "hunter2").await;

        let read = vault.read_decrypted_resource(&resource.id).await.unwrap();
        assert_eq!(read.secret, "hunter2");
        assert_eq!(read.name, "db");
    }

    #[tokio::test]
    async fn test_update_resource_reseals() {
        let vault = MemoryVault::new();
        let resource = sealed_resource(&vault, "old").await;

        vault
            .update_resource(
                &resource.id,
                &SecretFields {
                    name: "db2".into(),
                    username: "admin".into(),
                    uri: "https://db".into(),
                    secret: "new".into(),
                    description: "d".into(),
                },
            )
            .await
            .unwrap();

        let read = vault.read_decrypted_resource(&resource.id).await.unwrap();
        assert_eq!(read.secret, "new");
        assert_eq!(read.name, "db2");
    }

    #[tokio::test]
    async fn test_share_grant_and_revoke() {
        let vault = MemoryVault::new();
        let group = vault.add_group("Ops");
        let folder = vault.add_folder("shared", None);

        vault
            .share_folder(
                &folder.id,
                &[ShareOperation::grant_group(&group.id, PermissionLevel::Owner)],
            )
            .await
            .unwrap();
        let grants = vault.permissions_for(TargetKind::Folder, &folder.id);
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].level, PermissionLevel::Owner);

        vault
            .share_folder(&folder.id, &[ShareOperation::revoke_group(&group.id)])
            .await
            .unwrap();
        assert!(vault.permissions_for(TargetKind::Folder, &folder.id).is_empty());

        // Revoking an absent grant is accepted.
        vault
            .share_folder(&folder.id, &[ShareOperation::revoke_group(&group.id)])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_share_unknown_group_rejected() {
        let vault = MemoryVault::new();
        let folder = vault.add_folder("shared", None);
        let err = vault
            .share_folder(
                &folder.id,
                &[ShareOperation::grant_group("group-x", PermissionLevel::Read)],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_share_user_subject_rejected() {
        let vault = MemoryVault::new();
        let folder = vault.add_folder("shared", None);
        let group = vault.add_group("Ops");
        let op = ShareOperation {
            level: PermissionLevel::Read,
            aro: SubjectKind::User,
            aro_id: group.id,
        };

        let err = vault.share_folder(&folder.id, &[op]).await.unwrap_err();
        assert!(matches!(err, ClientError::Rejected(_)));
        assert!(vault.permissions_for(TargetKind::Folder, &folder.id).is_empty());
    }

    #[tokio::test]
    async fn test_fault_injection_journals_call() {
        let vault = MemoryVault::new();
        vault.fail_when(
            |call| matches!(call, VaultCall::GetPublicKey),
            ClientError::Transport("down".into()),
        );

        let err = vault.get_public_key().await.unwrap_err();
        assert_eq!(err, ClientError::Transport("down".into()));
        assert_eq!(vault.calls(), vec![VaultCall::GetPublicKey]);

        vault.clear_faults();
        assert!(vault.get_public_key().await.is_ok());
    }

    #[tokio::test]
    async fn test_seeded_resource_types() {
        let vault = MemoryVault::new();
        let types = vault
            .get_resource_types(&ListFilter::search(PASSWORD_AND_DESCRIPTION))
            .await
            .unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].slug, PASSWORD_AND_DESCRIPTION);
    }

    #[test]
    fn test_call_classification() {
        let grant = VaultCall::ShareResource {
            id: "r".into(),
            operations: vec![ShareOperation::grant_group("g", PermissionLevel::Read)],
        };
        let revoke = VaultCall::ShareResource {
            id: "r".into(),
            operations: vec![ShareOperation::revoke_group("g")],
        };
        assert!(grant.is_grant() && !grant.is_revoke());
        assert!(revoke.is_revoke() && !revoke.is_grant());
        assert!(!VaultCall::GetPublicKey.is_share());
    }
}
