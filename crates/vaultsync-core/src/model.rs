//! Vault entities as exchanged with the collaborator.
//!
//! Identifiers are opaque strings assigned by the vault. An absent parent
//! folder is `None`; the empty string is never used as a sentinel here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A folder in the vault hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub folder_parent_id: Option<String>,
}

/// Request body for creating or updating a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFolder {
    pub name: String,
    pub folder_parent_id: Option<String>,
}

/// A vault-defined resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    pub id: String,
    pub slug: String,
    pub name: String,
}

/// A group that can be the subject of a share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
}

/// A user that can be the subject of a share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// The vault's public key, as handed to the encrypt operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub fingerprint: String,
    pub armored: String,
}

/// Opaque armored ciphertext. Never decrypted by vaultsync itself.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext(pub String);

impl Ciphertext {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ciphertext({} bytes)", self.0.len())
    }
}

/// One encrypted secret entry attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretEntry {
    pub data: Ciphertext,
}

/// Request body for creating a secret resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResource {
    pub name: String,
    pub username: String,
    pub uri: String,
    pub description: String,
    pub resource_type_id: String,
    pub folder_parent_id: Option<String>,
    pub secrets: Vec<SecretEntry>,
}

/// A secret resource as stored by the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub username: String,
    pub uri: String,
    pub description: String,
    pub resource_type_id: String,
    pub folder_parent_id: Option<String>,
    pub secrets: Vec<SecretEntry>,
}

/// Result of the vault's combined read-and-decrypt operation.
#[derive(Clone, PartialEq, Eq)]
pub struct DecryptedResource {
    pub folder_parent_id: Option<String>,
    pub name: String,
    pub username: String,
    pub uri: String,
    pub secret: String,
    pub description: String,
}

impl fmt::Debug for DecryptedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptedResource")
            .field("folder_parent_id", &self.folder_parent_id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("uri", &self.uri)
            .field("secret", &"<redacted>")
            .field("description", &self.description)
            .finish()
    }
}

/// Fields rewritten by a secret update. The vault re-encrypts `secret`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretFields {
    pub name: String,
    pub username: String,
    pub uri: String,
    pub secret: String,
    pub description: String,
}

impl fmt::Debug for SecretFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretFields")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("uri", &self.uri)
            .field("secret", &"<redacted>")
            .field("description", &self.description)
            .finish()
    }
}

/// Optional filter passed to listing calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Substring the entity's name must contain.
    pub search: Option<String>,
}

impl ListFilter {
    /// No filtering: list everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }

    /// Check a name against this filter.
    pub fn matches(&self, name: &str) -> bool {
        match &self.search {
            Some(term) => name.contains(term.as_str()),
            None => true,
        }
    }
}
