//! State records: what the host persists between operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use vaultsync_core::{DecryptedResource, Folder, ShareKey, SubjectKind, TargetKind};

/// Persisted state of a managed folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub id: String,
    pub name: String,
    pub folder_parent_id: Option<String>,
}

impl From<Folder> for FolderRecord {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name,
            folder_parent_id: folder.folder_parent_id,
        }
    }
}

impl FolderRecord {
    pub fn as_folder(&self) -> Folder {
        Folder {
            id: self.id.clone(),
            name: self.name.clone(),
            folder_parent_id: self.folder_parent_id.clone(),
        }
    }
}

/// Persisted state of a managed secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    pub id: String,
    pub name: String,
    pub username: String,
    pub uri: String,
    /// Folder reference as declared (name or ID).
    pub folder_parent: Option<String>,
    /// Folder the resource actually sits in.
    pub folder_parent_id: Option<String>,
    pub password: String,
    pub description: String,
    pub resource_type_id: String,
}

impl fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("uri", &self.uri)
            .field("folder_parent", &self.folder_parent)
            .field("folder_parent_id", &self.folder_parent_id)
            .field("password", &"<redacted>")
            .field("description", &self.description)
            .field("resource_type_id", &self.resource_type_id)
            .finish()
    }
}

impl SecretRecord {
    /// Replace everything the vault reports with its current values.
    pub(crate) fn refresh(mut self, remote: DecryptedResource) -> Self {
        if remote.folder_parent_id != self.folder_parent_id {
            // Moved outside our control: the declared reference no longer holds.
            self.folder_parent = remote.folder_parent_id.clone();
        }
        self.folder_parent_id = remote.folder_parent_id;
        self.name = remote.name;
        self.username = remote.username;
        self.uri = remote.uri;
        self.password = remote.secret;
        self.description = remote.description;
        self
    }
}

/// Persisted state of a share. `id` is the hex [`ShareKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub id: String,
    pub target_kind: TargetKind,
    pub target_id: String,
    /// Resolved group; `None` when nothing is granted.
    pub share_group_id: Option<String>,
    /// Group name as declared, when the share names its group.
    pub share_group_name: Option<String>,
    pub modify: bool,
}

impl ShareRecord {
    pub(crate) fn new(
        target_kind: TargetKind,
        target_id: String,
        share_group_id: Option<String>,
        share_group_name: Option<String>,
        modify: bool,
    ) -> Self {
        let key = share_key(target_kind, &target_id, share_group_id.as_deref());
        Self {
            id: key.to_hex(),
            target_kind,
            target_id,
            share_group_id,
            share_group_name,
            modify,
        }
    }

    pub fn subject(&self) -> Option<&str> {
        self.share_group_id.as_deref()
    }
}

/// Local identity of a (target, group) relationship. No group keys as "".
pub fn share_key(target_kind: TargetKind, target_id: &str, group_id: Option<&str>) -> ShareKey {
    ShareKey::derive(
        target_kind,
        target_id,
        SubjectKind::Group,
        group_id.unwrap_or_default(),
    )
}

/// Result of the secret data source.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretData {
    pub id: String,
    pub folder_parent_id: Option<String>,
    pub name: String,
    pub username: String,
    pub uri: String,
    pub password: String,
    pub description: String,
}

impl fmt::Debug for SecretData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretData")
            .field("id", &self.id)
            .field("folder_parent_id", &self.folder_parent_id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("uri", &self.uri)
            .field("password", &"<redacted>")
            .field("description", &self.description)
            .finish()
    }
}

impl SecretData {
    pub(crate) fn new(id: &str, remote: DecryptedResource) -> Self {
        Self {
            id: id.to_string(),
            folder_parent_id: remote.folder_parent_id,
            name: remote.name,
            username: remote.username,
            uri: remote.uri,
            password: remote.secret,
            description: remote.description,
        }
    }
}
