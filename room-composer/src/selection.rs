/// Tile selection tracking with single and bulk operations
use std::collections::HashSet;

/// The set of currently selected tile keys. Order-free; membership is the
/// only query. Must be cleared whenever the template or its dimensions
/// change, since stale keys would address tiles that no longer exist.
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    selected: HashSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the key if absent, remove it if present.
    pub fn toggle(&mut self, key: &str) {
        if !self.selected.remove(key) {
            self.selected.insert(key.to_string());
        }
    }

    /// Replace the selection with every key from `valid_keys` that
    /// satisfies the predicate. Bulk commands ("select all floor",
    /// "select wall face") are prefix predicates over the key grammar.
    pub fn select_matching<'a, I, P>(&mut self, valid_keys: I, predicate: P)
    where
        I: IntoIterator<Item = &'a str>,
        P: Fn(&str) -> bool,
    {
        self.selected = valid_keys
            .into_iter()
            .filter(|key| predicate(key))
            .map(str::to_string)
            .collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}
