//! Persisted per-region ordering.

use std::collections::HashSet;

use tracing::warn;

use crate::{Entry, MergeEnd};

/// Durable, user-configured sequence of entries for one region.
///
/// Invariant: no entry appears twice. Every mutating method upholds it, and
/// loading from a stored list keeps only the first occurrence of a repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedOrder {
    entries: Vec<Entry>,
}

impl PersistedOrder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-decoded entries, dropping repeats.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.clone()))
            .collect();
        Self { entries }
    }

    /// Decode a stored string list. Strings that are not valid entries
    /// (empty, or a placeholder prefix with no key) are skipped with a
    /// warning; the next write of this order drops them from the store.
    pub fn from_persisted<S: AsRef<str>>(raw: impl IntoIterator<Item = S>) -> Self {
        Self::from_entries(raw.into_iter().filter_map(|s| {
            let raw = s.as_ref();
            match Entry::from_persisted(raw) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(raw, %err, "Skipping invalid persisted entry");
                    None
                }
            }
        }))
    }

    #[must_use]
    pub fn to_persisted(&self) -> Vec<String> {
        self.entries.iter().map(Entry::to_persisted).collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, entry: &Entry) -> bool {
        self.entries.contains(entry)
    }

    #[must_use]
    pub fn position(&self, entry: &Entry) -> Option<usize> {
        self.entries.iter().position(|e| e == entry)
    }

    /// Add `entry` at one end. Returns `false` when it was already present.
    pub fn push(&mut self, end: MergeEnd, entry: Entry) -> bool {
        if self.contains(&entry) {
            return false;
        }
        match end {
            MergeEnd::Head => self.entries.insert(0, entry),
            MergeEnd::Tail => self.entries.push(entry),
        }
        true
    }

    /// Insert `entry` at `index` (clamped to the length). An entry that is
    /// already present is moved rather than duplicated.
    pub fn insert(&mut self, index: usize, entry: Entry) {
        self.remove(&entry);
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
    }

    /// Remove `entry`, returning the index it occupied.
    pub fn remove(&mut self, entry: &Entry) -> Option<usize> {
        let index = self.position(entry)?;
        self.entries.remove(index);
        Some(index)
    }
}

impl<'a> IntoIterator for &'a PersistedOrder {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
