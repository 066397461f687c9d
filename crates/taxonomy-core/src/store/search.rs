//! Case-insensitive substring matching over precomputed lowercase fields.

use ipms_types::{NiceEntry, ViennaEntry};

/// Text fields a row can be found by.
pub(crate) trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for NiceEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.description.as_str(),
            self.description_en.as_deref().unwrap_or(""),
            self.code.as_str(),
        ]
    }
}

impl Searchable for ViennaEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.category_description.as_str(),
            self.category_description_en.as_str(),
            self.division_description.as_str(),
            self.division_description_en.as_str(),
            self.section_description.as_str(),
            self.section_description_en.as_str(),
        ]
    }
}

/// A row plus the lowercase text of every searchable field.
///
/// Fields are kept separate so a needle never matches across a field boundary.
#[derive(Debug, Clone)]
pub(crate) struct SearchRow<T> {
    pub row: T,
    fields: Vec<String>,
}

impl<T: Searchable> SearchRow<T> {
    pub fn new(row: T) -> Self {
        let fields = row
            .search_fields()
            .into_iter()
            .map(str::to_lowercase)
            .collect();
        Self { row, fields }
    }
}

impl<T> SearchRow<T> {
    /// `needle` must already be lowercase (see [`normalize_needle`]).
    pub fn matches(&self, needle: &str) -> bool {
        self.fields.iter().any(|field| field.contains(needle))
    }
}

/// Trim and lowercase user text; blank text is no constraint at all.
pub(crate) fn normalize_needle(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(&'static str, &'static str);

    impl Searchable for Pair {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.0, self.1]
        }
    }

    #[test]
    fn test_matches_any_field_case_insensitively() {
        let row = SearchRow::new(Pair("Phần MỀM máy tính", "Computer software"));
        assert!(row.matches("mềm"));
        assert!(row.matches("software"));
        assert!(!row.matches("hardware"));
    }

    #[test]
    fn test_needle_does_not_span_fields() {
        let row = SearchRow::new(Pair("star", "fish"));
        assert!(!row.matches("starfish"));
    }

    #[test]
    fn test_nice_code_is_searchable() {
        let row = SearchRow::new(NiceEntry {
            id: "n1".into(),
            group: 9,
            code: "090001".into(),
            description: "Phần mềm".into(),
            description_en: None,
        });
        assert!(row.matches("0900"));
    }

    #[test]
    fn test_normalize_needle() {
        assert_eq!(normalize_needle(Some("  STAR ")).as_deref(), Some("star"));
        assert!(normalize_needle(Some("   ")).is_none());
        assert!(normalize_needle(None).is_none());
    }
}
