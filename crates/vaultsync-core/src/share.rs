//! Share grants: permission levels and share operations.
//!
//! A share is a relationship between a target (folder or resource) and a
//! subject, the ARO (user or group). The vault only exposes a write path for
//! it: every change is a share call carrying a list of [`ShareOperation`]s.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer-encoded grant strength understood by the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionLevel {
    /// Sentinel that removes the subject's existing permission.
    Revoke,
    /// Read-only access.
    Read,
    /// Read-write access, equivalent to ownership.
    Owner,
}

impl PermissionLevel {
    /// Level requested by a descriptor's `modify` flag.
    pub fn from_modify(modify: bool) -> Self {
        if modify {
            PermissionLevel::Owner
        } else {
            PermissionLevel::Read
        }
    }

    /// The wire code: 1, 7 or -1.
    pub const fn code(self) -> i32 {
        match self {
            PermissionLevel::Revoke => -1,
            PermissionLevel::Read => 1,
            PermissionLevel::Owner => 7,
        }
    }

    pub fn is_revoke(self) -> bool {
        self == PermissionLevel::Revoke
    }
}

/// What a share applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Folder,
    Resource,
}

impl TargetKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            TargetKind::Folder => "Folder",
            TargetKind::Resource => "Resource",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who a share applies to (the ARO kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    User,
    Group,
}

impl SubjectKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            SubjectKind::User => "User",
            SubjectKind::Group => "Group",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a share call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareOperation {
    pub level: PermissionLevel,
    pub aro: SubjectKind,
    pub aro_id: String,
}

impl ShareOperation {
    /// Grant `level` to a group.
    pub fn grant_group(group_id: impl Into<String>, level: PermissionLevel) -> Self {
        Self {
            level,
            aro: SubjectKind::Group,
            aro_id: group_id.into(),
        }
    }

    /// Remove whatever permission a group currently holds.
    pub fn revoke_group(group_id: impl Into<String>) -> Self {
        Self::grant_group(group_id, PermissionLevel::Revoke)
    }

    pub fn is_revoke(&self) -> bool {
        self.level.is_revoke()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_codes() {
        assert_eq!(PermissionLevel::Read.code(), 1);
        assert_eq!(PermissionLevel::Owner.code(), 7);
        assert_eq!(PermissionLevel::Revoke.code(), -1);
    }

    #[test]
    fn test_revoke_operation() {
        let op = ShareOperation::revoke_group("g1");
        assert!(op.is_revoke());
        assert_eq!(op.aro, SubjectKind::Group);
        assert_eq!(op.aro_id, "g1");
    }

    proptest! {
        #[test]
        fn test_modify_flag_maps_to_level(modify in any::<bool>()) {
            let code = PermissionLevel::from_modify(modify).code();
            prop_assert_eq!(code, if modify { 7 } else { 1 });
        }
    }
}
