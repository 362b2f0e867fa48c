//! Multi-select state for bulk operations

use std::collections::BTreeSet;

/// A set of selected record ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id: Ord + Copy> {
    ids: BTreeSet<Id>,
}

impl<Id: Ord + Copy> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }
}

impl<Id: Ord + Copy> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn insert(&mut self, id: Id) {
        self.ids.insert(id);
    }

    /// Select exactly the given ids
    pub fn select_all<I: IntoIterator<Item = Id>>(&mut self, ids: I) {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> Vec<Id> {
        self.ids.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<Id: Ord + Copy> FromIterator<Id> for Selection<Id> {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
