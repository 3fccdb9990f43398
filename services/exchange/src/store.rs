//! Keyed state storage
//!
//! `StateMap` is the controller's ordered key-value store. `BTreeMap`
//! underneath keeps iteration and serialization deterministic regardless
//! of insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered key-value store for controller state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMap<K: Ord, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> StateMap<K, V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Get the value stored under a key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Store a value under a key, returning the replaced value if any.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord, V> Default for StateMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
