//! The per-compilation asset table.
//!
//! Maps asset names to [`AssetEntry`] values. Writing a name that already
//! exists replaces the entry: the last writer wins, and the name keeps the
//! position of its first insertion so flush order stays deterministic.

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::source::{AssetEntry, Source};

#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    entries: IndexMap<String, AssetEntry>,
}

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `source` under `name`, returning the entry it replaced.
    pub fn insert<S: Source + 'static>(
        &mut self,
        name: impl Into<String>,
        source: S,
    ) -> Option<AssetEntry> {
        self.insert_shared(name, Arc::new(source))
    }

    /// Insert an already shared entry under `name`, returning the entry it replaced.
    pub fn insert_shared(&mut self, name: impl Into<String>, entry: AssetEntry) -> Option<AssetEntry> {
        match self.entries.entry(name.into()) {
            Entry::Occupied(mut occupied) => {
                tracing::debug!(asset = %occupied.key(), "replacing existing asset");
                Some(occupied.insert(entry))
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&AssetEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove an asset, preserving the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<AssetEntry> {
        self.entries.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Apply every entry of `other` in its order, last writer wins.
    pub fn merge(&mut self, other: AssetTable) {
        for (name, entry) in other.entries {
            self.insert_shared(name, entry);
        }
    }
}

impl FromIterator<(String, AssetEntry)> for AssetTable {
    fn from_iter<I: IntoIterator<Item = (String, AssetEntry)>>(iter: I) -> Self {
        let mut table = AssetTable::new();
        for (name, entry) in iter {
            table.insert_shared(name, entry);
        }
        table
    }
}

impl IntoIterator for AssetTable {
    type Item = (String, AssetEntry);
    type IntoIter = indexmap::map::IntoIter<String, AssetEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RawSource, SourceExt};

    #[test]
    fn test_insert_and_get() {
        let mut table = AssetTable::new();
        assert!(table.insert("a.js", RawSource::from("a")).is_none());
        assert!(table.contains("a.js"));
        assert_eq!(table.get("a.js").unwrap().size(), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_last_writer_wins_and_keeps_position() {
        let mut table = AssetTable::new();
        table.insert("index.html", RawSource::from("first"));
        table.insert("bundle.js", RawSource::from("js"));
        let previous = table.insert("index.html", RawSource::from("second"));

        assert_eq!(previous.unwrap().text().as_deref(), Some("first"));
        assert_eq!(
            table.get("index.html").unwrap().text().as_deref(),
            Some("second")
        );
        assert_eq!(table.names().collect::<Vec<_>>(), ["index.html", "bundle.js"]);
    }

    #[test]
    fn test_merge_applies_in_order() {
        let mut table = AssetTable::new();
        table.insert("a", RawSource::from("old"));

        let mut other = AssetTable::new();
        other.insert("b", RawSource::from("b"));
        other.insert("a", RawSource::from("new"));
        table.merge(other);

        assert_eq!(table.get("a").unwrap().text().as_deref(), Some("new"));
        assert_eq!(table.names().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut table = AssetTable::new();
        table.insert("a", RawSource::from("a"));
        table.insert("b", RawSource::from("b"));
        table.insert("c", RawSource::from("c"));
        assert!(table.remove("b").is_some());
        assert!(table.remove("missing").is_none());
        assert_eq!(table.names().collect::<Vec<_>>(), ["a", "c"]);
    }
}
