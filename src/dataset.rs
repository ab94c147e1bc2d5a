//! Name-keyed collection of values gathered during one analysis run.

use std::collections::HashMap;

use serde::Serialize;

/// A single `(name, value)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<V> {
    pub name: String,
    pub value: V,
}

/// Mapping from entry name to value that remembers insertion order.
///
/// Inserting a name that is already present overwrites its value in place,
/// so the entry keeps the position it was first seen at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset<V> {
    entries: Vec<Entry<V>>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl<V> Default for Dataset<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: Copy> Dataset<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `name`. Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        if let Some(&pos) = self.index.get(&name) {
            return Some(std::mem::replace(&mut self.entries[pos].value, value));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(Entry { name, value });
        None
    }

    pub fn get(&self, name: &str) -> Option<V> {
        self.index.get(name).map(|&pos| self.entries[pos].value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<V>> {
        self.entries.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = V> + '_ {
        self.entries.iter().map(|e| e.value)
    }

    /// Entries ordered by name ascending.
    pub fn sorted_by_name(&self) -> Vec<&Entry<V>> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }
}

impl<V: Copy, N: Into<String>> FromIterator<(N, V)> for Dataset<V> {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        for (name, value) in iter {
            dataset.insert(name, value);
        }
        dataset
    }
}
