//! Resolution of human-facing references against vault listings.
//!
//! Every lookup is a linear scan that does not short-circuit: when several
//! entries match, the last one in iteration order wins. `matches` records how
//! many entries matched so callers can report the ambiguity.

use crate::error::{LookupKind, LookupMiss};
use crate::model::{Folder, Group, ResourceType};

/// Outcome of resolving a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found { id: String, matches: usize },
    NotFound,
}

impl Resolution {
    /// The resolved identifier, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Resolution::Found { id, .. } => Some(id),
            Resolution::NotFound => None,
        }
    }

    /// More than one entry matched the reference.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Resolution::Found { matches, .. } if *matches > 1)
    }

    /// Turn a miss into a typed [`LookupMiss`].
    pub fn require(self, kind: LookupKind, reference: &str) -> Result<String, LookupMiss> {
        match self {
            Resolution::Found { id, .. } => Ok(id),
            Resolution::NotFound => Err(LookupMiss::new(kind, reference)),
        }
    }
}

fn scan<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    is_match: impl Fn(&T) -> bool,
    id_of: impl Fn(&T) -> &str,
) -> Resolution {
    let mut found: Option<&str> = None;
    let mut matches = 0;
    for item in items {
        if is_match(item) {
            found = Some(id_of(item));
            matches += 1;
        }
    }
    match found {
        Some(id) => Resolution::Found {
            id: id.to_string(),
            matches,
        },
        None => Resolution::NotFound,
    }
}

/// Resolve a folder reference that may be either its ID or its name.
pub fn resolve_folder_id(folders: &[Folder], name_or_id: &str) -> Resolution {
    scan(
        folders,
        |f| f.id == name_or_id || f.name == name_or_id,
        |f| f.id.as_str(),
    )
}

/// Resolve a resource type by slug.
pub fn resolve_resource_type_id(types: &[ResourceType], slug: &str) -> Resolution {
    scan(types, |t| t.slug == slug, |t| t.id.as_str())
}

/// Resolve a group by name.
pub fn resolve_group_id(groups: &[Group], name: &str) -> Resolution {
    scan(groups, |g| g.name == name, |g| g.id.as_str())
}
