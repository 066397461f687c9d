//! Which group/category/division nodes are expanded in the result tree.

use std::collections::BTreeSet;

use ipms_types::ExpandKey;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    keys: BTreeSet<ExpandKey>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: &ExpandKey) -> bool {
        self.keys.contains(key)
    }

    /// Flip membership of `key`. Returns whether it is expanded afterwards.
    pub fn toggle(&mut self, key: ExpandKey) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    /// Replace the state with exactly `keys`.
    pub fn reset_to(&mut self, keys: impl IntoIterator<Item = ExpandKey>) {
        self.keys = keys.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpandKey> {
        self.keys.iter()
    }
}
