//! Nice and Vienna classification types.
//!
//! Both taxonomies are read-only reference data. They differ in shape:
//!
//! ```text
//! Nice:    group (1-45) ──► class code
//! Vienna:  category ──► division ──► section
//! ```
//!
//! `TaxonomyEntry` is the tagged union the picker works with; the
//! [`Classified`] trait is the small interface grouping and expand-state
//! logic goes through.

use serde::{Deserialize, Serialize};

use crate::lenient;

/// Lowest Nice group number.
pub const NICE_GROUP_MIN: u32 = 1;

/// Highest Nice group number.
pub const NICE_GROUP_MAX: u32 = 45;

/// Returns true if `group` is a valid Nice group number.
pub fn is_valid_nice_group(group: u32) -> bool {
    (NICE_GROUP_MIN..=NICE_GROUP_MAX).contains(&group)
}

// ============================================================================
// TAXONOMY KIND
// ============================================================================

/// Which classification a picker or query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyKind {
    Nice,
    Vienna,
}

impl TaxonomyKind {
    /// Whether the taxonomy supports a numeric group/category filter in the picker.
    pub fn supports_group_filter(self) -> bool {
        matches!(self, TaxonomyKind::Nice)
    }
}

impl std::fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxonomyKind::Nice => write!(f, "nice"),
            TaxonomyKind::Vienna => write!(f, "vienna"),
        }
    }
}

// ============================================================================
// EXPAND KEYS
// ============================================================================

/// Key of an expandable node in a grouped result tree.
///
/// Vienna divisions are keyed by category *and* division code because
/// division codes repeat across categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum ExpandKey {
    Group { group: u32 },
    Category { category: u32 },
    Division { category: u32, division: String },
}

impl ExpandKey {
    pub fn group(group: u32) -> Self {
        ExpandKey::Group { group }
    }

    pub fn category(category: u32) -> Self {
        ExpandKey::Category { category }
    }

    pub fn division(category: u32, division: impl Into<String>) -> Self {
        ExpandKey::Division {
            category,
            division: division.into(),
        }
    }
}

/// Interface shared by every taxonomy leaf.
pub trait Classified {
    /// Identifier, unique within the taxonomy.
    fn id(&self) -> &str;

    /// Keys of every ancestor node, outermost first.
    fn expand_keys(&self) -> Vec<ExpandKey>;

    /// Single-line display label.
    fn label(&self) -> String;
}

// ============================================================================
// NICE
// ============================================================================

/// Goods or services, as recorded on the Nice group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NiceGroupKind {
    Goods,
    Services,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A Nice group (class heading 1-45).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NiceGroup {
    #[serde(deserialize_with = "lenient::number")]
    pub group: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description_en: Option<String>,
    #[serde(default)]
    pub kind: NiceGroupKind,
}

impl NiceGroup {
    /// Select-list label for the group.
    pub fn label(&self) -> String {
        format!("Group {}", self.group)
    }
}

/// A Nice goods/services item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NiceEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub group: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description_en: Option<String>,
}

impl Classified for NiceEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn expand_keys(&self) -> Vec<ExpandKey> {
        vec![ExpandKey::group(self.group)]
    }

    fn label(&self) -> String {
        format!("{} {}", self.code, self.description)
            .trim()
            .to_string()
    }
}

// ============================================================================
// VIENNA
// ============================================================================

/// A Vienna section with its category and division context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViennaEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub category: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category_description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category_description_en: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub division: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub division_description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub division_description_en: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub section: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub section_description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub section_description_en: String,
}

impl Classified for ViennaEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn expand_keys(&self) -> Vec<ExpandKey> {
        vec![
            ExpandKey::category(self.category),
            ExpandKey::division(self.category, self.division.clone()),
        ]
    }

    fn label(&self) -> String {
        format!("{} {}", self.section, self.section_description)
            .trim()
            .to_string()
    }
}

// ============================================================================
// TAGGED UNION
// ============================================================================

/// One leaf of either taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaxonomyEntry {
    Nice(NiceEntry),
    Vienna(ViennaEntry),
}

impl TaxonomyEntry {
    pub fn kind(&self) -> TaxonomyKind {
        match self {
            TaxonomyEntry::Nice(_) => TaxonomyKind::Nice,
            TaxonomyEntry::Vienna(_) => TaxonomyKind::Vienna,
        }
    }

    pub fn as_nice(&self) -> Option<&NiceEntry> {
        match self {
            TaxonomyEntry::Nice(entry) => Some(entry),
            TaxonomyEntry::Vienna(_) => None,
        }
    }

    pub fn as_vienna(&self) -> Option<&ViennaEntry> {
        match self {
            TaxonomyEntry::Vienna(entry) => Some(entry),
            TaxonomyEntry::Nice(_) => None,
        }
    }

    /// Primary-language description of the leaf.
    pub fn description(&self) -> &str {
        match self {
            TaxonomyEntry::Nice(entry) => &entry.description,
            TaxonomyEntry::Vienna(entry) => &entry.section_description,
        }
    }
}

impl Classified for TaxonomyEntry {
    fn id(&self) -> &str {
        match self {
            TaxonomyEntry::Nice(entry) => entry.id(),
            TaxonomyEntry::Vienna(entry) => entry.id(),
        }
    }

    fn expand_keys(&self) -> Vec<ExpandKey> {
        match self {
            TaxonomyEntry::Nice(entry) => entry.expand_keys(),
            TaxonomyEntry::Vienna(entry) => entry.expand_keys(),
        }
    }

    fn label(&self) -> String {
        match self {
            TaxonomyEntry::Nice(entry) => entry.label(),
            TaxonomyEntry::Vienna(entry) => entry.label(),
        }
    }
}

impl From<NiceEntry> for TaxonomyEntry {
    fn from(entry: NiceEntry) -> Self {
        TaxonomyEntry::Nice(entry)
    }
}

impl From<ViennaEntry> for TaxonomyEntry {
    fn from(entry: ViennaEntry) -> Self {
        TaxonomyEntry::Vienna(entry)
    }
}

// ============================================================================
// QUERY
// ============================================================================

/// A lookup against one taxonomy.
///
/// `group` is the Nice group or the Vienna category. `text` is matched as a
/// case-insensitive substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyQuery {
    pub kind: TaxonomyKind,
    #[serde(default)]
    pub group: Option<u32>,
    #[serde(default)]
    pub text: Option<String>,
}

impl TaxonomyQuery {
    pub fn nice(group: Option<u32>, text: Option<&str>) -> Self {
        Self::new(TaxonomyKind::Nice, group, text)
    }

    pub fn vienna(text: Option<&str>) -> Self {
        Self::new(TaxonomyKind::Vienna, None, text)
    }

    /// Build a query, normalising blank text to `None`.
    pub fn new(kind: TaxonomyKind, group: Option<u32>, text: Option<&str>) -> Self {
        let text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self { kind, group, text }
    }

    /// True when neither a group nor text constrains the query.
    pub fn is_unconstrained(&self) -> bool {
        self.group.is_none() && self.text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vienna(id: &str, category: u32, division: &str) -> ViennaEntry {
        ViennaEntry {
            id: id.to_string(),
            category,
            category_description: String::new(),
            category_description_en: String::new(),
            division: division.to_string(),
            division_description: String::new(),
            division_description_en: String::new(),
            section: format!("{division}.01"),
            section_description: "Stars".to_string(),
            section_description_en: "Stars".to_string(),
        }
    }

    #[test]
    fn test_entry_tagged_serialization() {
        let entry = TaxonomyEntry::Nice(NiceEntry {
            id: "n1".to_string(),
            group: 9,
            code: "090001".to_string(),
            description: "Phần mềm".to_string(),
            description_en: Some("Software".to_string()),
        });

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "nice");
        assert_eq!(json["descriptionEn"], "Software");

        let back: TaxonomyEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_vienna_expand_keys_are_compound() {
        let entry = vienna("v1", 1, "1.1");
        assert_eq!(
            entry.expand_keys(),
            vec![ExpandKey::category(1), ExpandKey::division(1, "1.1")]
        );
    }

    #[test]
    fn test_malformed_nice_row_decodes() {
        let entry: NiceEntry =
            serde_json::from_str(r#"{"id": 17, "group": "9", "description": null}"#).unwrap();
        assert_eq!(entry.id, "17");
        assert_eq!(entry.group, 9);
        assert_eq!(entry.code, "");
        assert_eq!(entry.description, "");
        assert_eq!(entry.label(), "");
    }

    #[test]
    fn test_query_normalises_blank_text() {
        let query = TaxonomyQuery::nice(None, Some("   "));
        assert!(query.is_unconstrained());

        let query = TaxonomyQuery::vienna(Some(" star "));
        assert_eq!(query.text.as_deref(), Some("star"));
        assert!(!query.is_unconstrained());
    }

    #[test]
    fn test_nice_group_range() {
        assert!(!is_valid_nice_group(0));
        assert!(is_valid_nice_group(1));
        assert!(is_valid_nice_group(45));
        assert!(!is_valid_nice_group(46));
    }

    #[test]
    fn test_unknown_group_kind() {
        let group: NiceGroup =
            serde_json::from_str(r#"{"group": 35, "description": "Quảng cáo", "kind": "other"}"#)
                .unwrap();
        assert_eq!(group.kind, NiceGroupKind::Unknown);
        assert_eq!(group.label(), "Group 35");
    }
}
