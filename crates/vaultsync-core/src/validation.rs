//! Descriptor validation.
//!
//! Descriptors are what the host framework hands over: every attribute is
//! optional at the type level because the host may omit any of them. They
//! are validated into specs before any remote call is made.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::share::{PermissionLevel, TargetKind};

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

fn required_non_empty(
    value: Option<String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    let value = required(value, field)?;
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value)
}

/// The host passes an unset optional string as "", treat it as absent.
fn optional_reference(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Folder attributes: `name` (required), `folder_parent_id` (optional).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderDescriptor {
    pub name: Option<String>,
    pub folder_parent_id: Option<String>,
}

/// A validated folder descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSpec {
    pub name: String,
    pub parent_id: Option<String>,
}

impl FolderDescriptor {
    pub fn validate(self) -> Result<FolderSpec, ValidationError> {
        Ok(FolderSpec {
            name: required_non_empty(self.name, "name")?,
            parent_id: optional_reference(self.folder_parent_id),
        })
    }
}

/// Secret attributes.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretDescriptor {
    pub name: Option<String>,
    pub username: Option<String>,
    pub uri: Option<String>,
    /// Folder name or ID.
    pub folder_parent: Option<String>,
    pub password: Option<String>,
    pub description: Option<String>,
}

impl fmt::Debug for SecretDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretDescriptor")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("uri", &self.uri)
            .field("folder_parent", &self.folder_parent)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("description", &self.description)
            .finish()
    }
}

/// A validated secret descriptor.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretSpec {
    pub name: String,
    pub username: String,
    pub uri: String,
    pub folder_parent: Option<String>,
    pub password: String,
    pub description: String,
}

impl fmt::Debug for SecretSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretSpec")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("uri", &self.uri)
            .field("folder_parent", &self.folder_parent)
            .field("password", &"<redacted>")
            .field("description", &self.description)
            .finish()
    }
}

impl SecretDescriptor {
    /// Validate a managed secret: name, username, uri and password are required.
    pub fn validate(self) -> Result<SecretSpec, ValidationError> {
        Ok(SecretSpec {
            name: required_non_empty(self.name, "name")?,
            username: required(self.username, "username")?,
            uri: required(self.uri, "uri")?,
            folder_parent: optional_reference(self.folder_parent),
            password: required_non_empty(self.password, "password")?,
            description: self.description.unwrap_or_default(),
        })
    }
}

/// Share attributes for a folder or resource target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareDescriptor {
    /// `folder_id` or `resource_id`, depending on the target kind.
    pub target_id: Option<String>,
    /// Empty string means "no grant".
    pub share_group_id: Option<String>,
    /// Group name, resolved through the vault's group listing.
    pub share_group_name: Option<String>,
    pub modify: Option<bool>,
}

/// Who a share should be granted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectRef {
    /// No grant on this side.
    Unshared,
    GroupId(String),
    GroupName(String),
}

impl SubjectRef {
    pub fn is_unshared(&self) -> bool {
        matches!(self, SubjectRef::Unshared)
    }
}

/// A validated share descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSpec {
    pub target_kind: TargetKind,
    pub target_id: String,
    pub subject: SubjectRef,
    pub modify: bool,
}

impl ShareSpec {
    pub fn level(&self) -> PermissionLevel {
        PermissionLevel::from_modify(self.modify)
    }
}

impl ShareDescriptor {
    pub fn validate(self, target_kind: TargetKind) -> Result<ShareSpec, ValidationError> {
        let target_field = match target_kind {
            TargetKind::Folder => "folder_id",
            TargetKind::Resource => "resource_id",
        };
        let target_id = required_non_empty(self.target_id, target_field)?;
        let modify = self.modify.ok_or(ValidationError::MissingField("modify"))?;

        let subject = match (self.share_group_id, optional_reference(self.share_group_name)) {
            (Some(id), Some(_)) if !id.is_empty() => {
                return Err(ValidationError::ConflictingFields(
                    "share_group_id",
                    "share_group_name",
                ))
            }
            (_, Some(name)) => SubjectRef::GroupName(name),
            (Some(id), None) if id.is_empty() => SubjectRef::Unshared,
            (Some(id), None) => SubjectRef::GroupId(id),
            (None, None) => return Err(ValidationError::MissingField("share_group_id")),
        };

        Ok(ShareSpec {
            target_kind,
            target_id,
            subject,
            modify,
        })
    }
}
