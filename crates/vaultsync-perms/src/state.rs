//! Share state and the plans that move between states.
//!
//! A share relates one target to at most one subject. Its state is either
//! unshared or shared at some level. Moving between states is expressed as a
//! [`SharePlan`]: an optional revoke followed by an optional grant. Plans are
//! pure values; executing them is the reconciler's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use vaultsync_core::{PermissionLevel, TargetKind};

/// The folder or resource a share applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareTarget {
    pub kind: TargetKind,
    pub id: String,
}

impl ShareTarget {
    pub fn new(kind: TargetKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }

    pub fn folder(id: impl Into<String>) -> Self {
        Self::new(TargetKind::Folder, id)
    }

    pub fn resource(id: impl Into<String>) -> Self {
        Self::new(TargetKind::Resource, id)
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// State of one (target, subject) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareState {
    Unshared,
    Shared(PermissionLevel),
}

/// Share calls needed for one transition, executed revoke first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePlan {
    pub revoke: Option<String>,
    pub grant: Option<(String, PermissionLevel)>,
}

impl SharePlan {
    /// `Unshared -> Shared(level)`, or nothing if there is no subject.
    pub fn create(subject: Option<&str>, level: PermissionLevel) -> Self {
        Self {
            revoke: None,
            grant: subject.map(|s| (s.to_string(), level)),
        }
    }

    /// Unconditional revoke of the old subject, then grant to the new one.
    ///
    /// No diffing: an unchanged subject is still revoked and re-granted.
    pub fn update(old: Option<&str>, new: Option<&str>, level: PermissionLevel) -> Self {
        Self {
            revoke: old.map(str::to_string),
            grant: new.map(|s| (s.to_string(), level)),
        }
    }

    /// `Shared(_) -> Unshared`, or nothing if there is no subject.
    pub fn delete(subject: Option<&str>) -> Self {
        Self {
            revoke: subject.map(str::to_string),
            grant: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.revoke.is_none() && self.grant.is_none()
    }

    /// Number of share calls the plan issues.
    pub fn call_count(&self) -> usize {
        usize::from(self.revoke.is_some()) + usize::from(self.grant.is_some())
    }

    /// State the subject ends in once the plan fully applies.
    pub fn final_state(&self) -> ShareState {
        match &self.grant {
            Some((_, level)) => ShareState::Shared(*level),
            None => ShareState::Unshared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_create_without_subject_is_empty() {
        let plan = SharePlan::create(None, PermissionLevel::Owner);
        assert!(plan.is_empty());
        assert_eq!(plan.final_state(), ShareState::Unshared);
    }

    #[test]
    fn test_update_same_subject_still_revokes() {
        let plan = SharePlan::update(Some("g1"), Some("g1"), PermissionLevel::Read);
        assert_eq!(plan.revoke.as_deref(), Some("g1"));
        assert_eq!(plan.grant, Some(("g1".to_string(), PermissionLevel::Read)));
        assert_eq!(plan.call_count(), 2);
    }

    #[test]
    fn test_update_to_unshared() {
        let plan = SharePlan::update(Some("g1"), None, PermissionLevel::Owner);
        assert_eq!(plan.call_count(), 1);
        assert_eq!(plan.final_state(), ShareState::Unshared);
    }

    #[test]
    fn test_create_with_subject_ends_shared() {
        let plan = SharePlan::create(Some("g"), PermissionLevel::Owner);
        assert_eq!(plan.call_count(), 1);
        assert_eq!(plan.final_state(), ShareState::Shared(PermissionLevel::Owner));
    }

    #[test]
    fn test_target_display() {
        assert_eq!(ShareTarget::folder("f1").to_string(), "Folder f1");
    }

    fn subject() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z0-9]{1,8}")
    }

    proptest! {
        #[test]
        fn prop_update_calls_match_subjects(old in subject(), new in subject(), modify: bool) {
            let plan = SharePlan::update(
                old.as_deref(),
                new.as_deref(),
                PermissionLevel::from_modify(modify),
            );
            prop_assert_eq!(plan.revoke.is_some(), old.is_some());
            prop_assert_eq!(plan.grant.is_some(), new.is_some());
            prop_assert_eq!(
                plan.final_state() != ShareState::Unshared,
                new.is_some()
            );
        }
    }
}
