//! Set of deleted report ids
//!
//! Keeps insertion order for display and a hash index for membership.
//! There is no eviction: an id stays tombstoned until the set is cleared.

use crate::report::ReportId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Tombstones {
    order: Vec<ReportId>,
    index: HashSet<ReportId>,
}

impl Tombstones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a stored list, dropping repeats
    pub fn from_ids(ids: impl IntoIterator<Item = ReportId>) -> Self {
        let mut tombstones = Self::new();
        for id in ids {
            tombstones.insert(id);
        }
        tombstones
    }

    /// Add an id; returns false if it was already present
    pub fn insert(&mut self, id: ReportId) -> bool {
        if self.index.insert(id.clone()) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: &ReportId) -> bool {
        self.index.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }

    /// Ids in the order they were deleted
    pub fn as_slice(&self) -> &[ReportId] {
        &self.order
    }
}
