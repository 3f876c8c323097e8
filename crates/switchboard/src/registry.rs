//! Ordered, key-indexed storage shared by the tool, prompt, and resource registries.

use std::collections::HashMap;

/// An entry that can be stored in a [`NamedRegistry`].
pub trait Keyed {
    /// The unique key of this entry (tool name, prompt name, resource URI).
    fn key(&self) -> &str;
}

/// Entries in registration order with O(1) lookup by key.
#[derive(Debug)]
pub struct NamedRegistry<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for NamedRegistry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> NamedRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, handing it back if its key is already taken.
    pub fn insert(&mut self, entry: T) -> Result<(), T> {
        if self.index.contains_key(entry.key()) {
            return Err(entry);
        }
        self.index.insert(entry.key().to_string(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
