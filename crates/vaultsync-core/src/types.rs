//! Strong type definitions for vaultsync.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::share::{SubjectKind, TargetKind};

/// A 32-byte identity for a sharing relationship.
///
/// Shares have no remote identifier, so the local one is derived from the
/// relationship itself: `Blake3(target_kind, target_id, subject_kind,
/// subject_id)`. Reconciling the same relationship twice yields the same key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareKey(pub [u8; 32]);

impl ShareKey {
    /// Derive the key for a (target, subject) pair.
    ///
    /// Fields are length-prefixed so that no two distinct tuples hash the
    /// same input.
    pub fn derive(
        target_kind: TargetKind,
        target_id: &str,
        subject_kind: SubjectKind,
        subject_id: &str,
    ) -> Self {
        let mut hasher = blake3::Hasher::new_derive_key("vaultsync-share-key-v0");
        for field in [
            target_kind.as_str(),
            target_id,
            subject_kind.as_str(),
            subject_id,
        ] {
            hasher.update(&(field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for ShareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShareKey({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ShareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
