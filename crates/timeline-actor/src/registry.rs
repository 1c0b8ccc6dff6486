//! # Keyed Registry
//!
//! Auxiliary per-entity state (animation handles, disclosure phases) lives in a
//! [`Registry`] keyed by the entity's identity. Entries are created on first use and
//! pruned whenever the owning list is replaced, so state for entities that vanished
//! from the list cannot leak.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Map from identity key to auxiliary state.
#[derive(Debug, Clone)]
pub struct Registry<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> Registry<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns the entry for `key`, creating it on first use.
    pub fn get_or_insert_with(&mut self, key: &K, create: impl FnOnce() -> V) -> &mut V {
        self.entries.entry(key.clone()).or_insert_with(create)
    }

    /// Drops every entry whose key is not in `live`. Returns the number removed.
    pub fn retain_live(&mut self, live: &HashSet<K>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| live.contains(key));
        before - self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
