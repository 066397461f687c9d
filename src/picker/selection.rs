//! Session selection: ordered, deduplicated by entry id.

use ipms_types::{Classified, TaxonomyEntry};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    entries: Vec<TaxonomyEntry>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a caller list. Later duplicates of an id are dropped.
    pub fn seeded<'a>(items: impl IntoIterator<Item = &'a TaxonomyEntry>) -> Self {
        let mut set = Self::new();
        for item in items {
            if !set.contains(item.id()) {
                set.entries.push(item.clone());
            }
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&TaxonomyEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Remove the entry if its id is present, append it otherwise.
    /// Returns whether the entry is selected afterwards.
    pub fn toggle(&mut self, entry: &TaxonomyEntry) -> bool {
        if let Some(pos) = self.entries.iter().position(|e| e.id() == entry.id()) {
            self.entries.remove(pos);
            false
        } else {
            self.entries.push(entry.clone());
            true
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxonomyEntry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id()).collect()
    }

    pub fn into_vec(self) -> Vec<TaxonomyEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipms_types::NiceEntry;
    use proptest::prelude::*;

    fn nice(id: &str, description: &str) -> TaxonomyEntry {
        TaxonomyEntry::Nice(NiceEntry {
            id: id.to_string(),
            group: 9,
            code: format!("09{id}"),
            description: description.to_string(),
            description_en: None,
        })
    }

    #[test]
    fn test_seed_drops_duplicate_ids() {
        let set = SelectionSet::seeded(&[nice("a", "first"), nice("b", ""), nice("a", "again")]);
        assert_eq!(set.ids(), vec!["a", "b"]);
        assert_eq!(set.get("a").unwrap().description(), "first");
    }

    #[test]
    fn test_identity_is_by_id() {
        let mut set = SelectionSet::new();
        assert!(set.toggle(&nice("a", "from first query")));
        // Same id from a different query is the same selection
        assert!(!set.toggle(&nice("a", "from second query")));
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_preserves_order() {
        let mut set = SelectionSet::seeded(&[nice("a", ""), nice("b", "")]);
        set.toggle(&nice("c", ""));
        set.toggle(&nice("a", ""));
        assert_eq!(set.ids(), vec!["b", "c"]);
    }

    proptest! {
        #[test]
        fn prop_double_toggle_restores(
            seed in proptest::collection::vec(0u8..8, 0..8),
            pick in 0u8..12,
        ) {
            let seed: Vec<TaxonomyEntry> =
                seed.iter().map(|n| nice(&n.to_string(), "")).collect();
            let mut set = SelectionSet::seeded(&seed);
            let before = set.clone();

            let entry = nice(&pick.to_string(), "");
            set.toggle(&entry);
            set.toggle(&entry);

            prop_assert_eq!(set.len(), before.len());
            // Re-adding a removed member appends it, so compare membership
            let mut after_ids = set.ids();
            let mut before_ids = before.ids();
            after_ids.sort_unstable();
            before_ids.sort_unstable();
            prop_assert_eq!(after_ids, before_ids);
            if !before.contains(&pick.to_string()) {
                prop_assert_eq!(set, before);
            }
        }

        #[test]
        fn prop_ids_stay_unique(ops in proptest::collection::vec(0u8..6, 0..40)) {
            let mut set = SelectionSet::new();
            for op in ops {
                set.toggle(&nice(&op.to_string(), ""));
            }
            let mut ids = set.ids();
            let len = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), len);
        }
    }
}
