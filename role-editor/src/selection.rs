//! Selected permission set

use std::collections::BTreeSet;

use shared::PermissionId;

/// Set of permission ids held by a draft
///
/// Ordered so that payloads and debug output are stable. Ids are not checked
/// against the catalog; stale ids stay until removed explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(BTreeSet<PermissionId>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: PermissionId) -> bool {
        self.0.contains(&id)
    }

    /// Flip membership, returning the new membership
    pub fn toggle(&mut self, id: PermissionId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Add or remove a single id
    pub fn set(&mut self, id: PermissionId, checked: bool) {
        if checked {
            self.0.insert(id);
        } else {
            self.0.remove(&id);
        }
    }

    /// Add or remove every id in `ids`
    pub fn set_all<I: IntoIterator<Item = PermissionId>>(&mut self, ids: I, checked: bool) {
        for id in ids {
            self.set(id, checked);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PermissionId> + '_ {
        self.0.iter().copied()
    }

    /// Ids in ascending order
    pub fn to_vec(&self) -> Vec<PermissionId> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<PermissionId> for Selection {
    fn from_iter<I: IntoIterator<Item = PermissionId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<PermissionId> for Selection {
    fn extend<I: IntoIterator<Item = PermissionId>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
