//! Folder hierarchy checks.
//!
//! The vault accepts any parent reference it knows about, so a move can
//! close a loop. These checks run against a folder listing before a move is
//! issued when the caller opts into them.

use std::collections::{HashMap, HashSet};

use crate::error::ValidationError;
use crate::model::Folder;

/// Check that placing `folder_id` under `new_parent` keeps the tree acyclic.
///
/// `None` (move to root) is always valid.
pub fn check_folder_move(
    folders: &[Folder],
    folder_id: &str,
    new_parent: Option<&str>,
) -> Result<(), ValidationError> {
    let Some(parent) = new_parent else {
        return Ok(());
    };

    if parent == folder_id {
        return Err(ValidationError::SelfParent(folder_id.to_string()));
    }

    let parents: HashMap<&str, Option<&str>> = folders
        .iter()
        .map(|f| (f.id.as_str(), f.folder_parent_id.as_deref()))
        .collect();

    if !parents.contains_key(parent) {
        return Err(ValidationError::UnknownParent(parent.to_string()));
    }

    // Walk up from the new parent; reaching the folder itself means a cycle.
    let mut seen = HashSet::new();
    let mut cursor = Some(parent);
    while let Some(current) = cursor {
        if current == folder_id {
            return Err(ValidationError::FolderCycle {
                folder_id: folder_id.to_string(),
                parent_id: parent.to_string(),
            });
        }
        if !seen.insert(current) {
            // Pre-existing loop above us that does not include this folder.
            break;
        }
        cursor = parents.get(current).copied().flatten();
    }

    Ok(())
}
