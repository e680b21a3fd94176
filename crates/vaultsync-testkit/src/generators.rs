//! Proptest generators for property-based testing.

use proptest::prelude::*;

use vaultsync_core::{
    Folder, Group, PermissionLevel, SecretDescriptor, ShareDescriptor, SubjectKind, TargetKind,
};

/// A display name: short, printable, never empty.
pub fn name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 _-]{0,23}".prop_map(String::from)
}

/// An opaque vault identifier.
pub fn vault_id() -> impl Strategy<Value = String> {
    "[a-f0-9]{8}-[a-f0-9]{4}".prop_map(String::from)
}

pub fn target_kind() -> impl Strategy<Value = TargetKind> {
    prop_oneof![Just(TargetKind::Folder), Just(TargetKind::Resource)]
}

pub fn subject_kind() -> impl Strategy<Value = SubjectKind> {
    prop_oneof![Just(SubjectKind::User), Just(SubjectKind::Group)]
}

/// A granting level (never the revoke sentinel).
pub fn grant_level() -> impl Strategy<Value = PermissionLevel> {
    any::<bool>().prop_map(PermissionLevel::from_modify)
}

/// A secret descriptor that passes validation.
pub fn secret_descriptor() -> impl Strategy<Value = SecretDescriptor> {
    (
        name(),
        "[a-z]{1,12}",
        "https://[a-z]{1,12}\\.example",
        "[ -~]{1,40}",
        proptest::option::of("[ -~]{0,40}"),
    )
        .prop_map(|(name, username, uri, password, description)| SecretDescriptor {
            name: Some(name),
            username: Some(username),
            uri: Some(uri),
            folder_parent: None,
            password: Some(password),
            description,
        })
}

/// A share descriptor by group ID; the ID may be empty (no grant).
pub fn share_descriptor() -> impl Strategy<Value = ShareDescriptor> {
    (
        vault_id(),
        prop_oneof![Just(String::new()), vault_id()],
        any::<bool>(),
    )
        .prop_map(|(target_id, group_id, modify)| ShareDescriptor {
            target_id: Some(target_id),
            share_group_id: Some(group_id),
            share_group_name: None,
            modify: Some(modify),
        })
}

/// Groups whose names are drawn from a small pool, so duplicates are common.
pub fn group_listing(max_len: usize) -> impl Strategy<Value = Vec<Group>> {
    prop::collection::vec(prop::sample::select(vec!["ops", "dev", "sec"]), 0..=max_len).prop_map(
        |names| {
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| Group {
                    id: format!("group-{i}"),
                    name: name.to_string(),
                })
                .collect()
        },
    )
}

/// A folder tree: each folder's parent, if any, appears earlier in the list.
pub fn folder_tree(max_len: usize) -> impl Strategy<Value = Vec<Folder>> {
    prop::collection::vec(any::<prop::sample::Index>(), 1..=max_len).prop_map(|picks| {
        let mut folders: Vec<Folder> = Vec::with_capacity(picks.len());
        for (i, pick) in picks.into_iter().enumerate() {
            // Index 0 of the choice space means "root".
            let choice = pick.index(i + 1);
            let parent = (choice > 0).then(|| folders[choice - 1].id.clone());
            folders.push(Folder {
                id: format!("folder-{i}"),
                name: format!("f{i}"),
                folder_parent_id: parent,
            });
        }
        folders
    })
}
