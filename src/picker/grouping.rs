//! Hierarchical grouping of query results.
//!
//! ```text
//! Nice:    NiceGroupNode(group) ──► NiceEntry*
//! Vienna:  CategoryNode ──► DivisionNode ──► ViennaEntry* (sections)
//! ```
//!
//! Nodes appear in the order their first row appears in the results; rows
//! keep the order the source supplied. Nothing here re-sorts.

use std::collections::HashMap;

use ipms_types::{ExpandKey, NiceEntry, TaxonomyEntry, ViennaEntry};

#[derive(Debug, Clone, PartialEq)]
pub struct NiceGroupNode {
    pub group: u32,
    pub entries: Vec<NiceEntry>,
}

impl NiceGroupNode {
    pub fn key(&self) -> ExpandKey {
        ExpandKey::group(self.group)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DivisionNode {
    pub category: u32,
    pub division: String,
    pub description: String,
    pub description_en: String,
    pub sections: Vec<ViennaEntry>,
}

impl DivisionNode {
    pub fn key(&self) -> ExpandKey {
        ExpandKey::division(self.category, self.division.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub category: u32,
    pub description: String,
    pub description_en: String,
    pub divisions: Vec<DivisionNode>,
}

impl CategoryNode {
    pub fn key(&self) -> ExpandKey {
        ExpandKey::category(self.category)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultTree {
    #[default]
    Empty,
    Nice(Vec<NiceGroupNode>),
    Vienna(Vec<CategoryNode>),
}

impl ResultTree {
    /// Group `entries` by their hierarchy. The tree takes the shape of the
    /// first entry; rows of the other taxonomy are skipped.
    pub fn build(entries: &[TaxonomyEntry]) -> Self {
        match entries.first() {
            None => ResultTree::Empty,
            Some(TaxonomyEntry::Nice(_)) => {
                ResultTree::Nice(group_nice(entries.iter().filter_map(TaxonomyEntry::as_nice)))
            }
            Some(TaxonomyEntry::Vienna(_)) => ResultTree::Vienna(group_vienna(
                entries.iter().filter_map(TaxonomyEntry::as_vienna),
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ResultTree::Empty => true,
            ResultTree::Nice(groups) => groups.is_empty(),
            ResultTree::Vienna(categories) => categories.is_empty(),
        }
    }

    /// Number of leaf rows in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            ResultTree::Empty => 0,
            ResultTree::Nice(groups) => groups.iter().map(|g| g.entries.len()).sum(),
            ResultTree::Vienna(categories) => categories
                .iter()
                .flat_map(|c| &c.divisions)
                .map(|d| d.sections.len())
                .sum(),
        }
    }

    /// Every expandable node key, outermost first within each branch.
    pub fn node_keys(&self) -> Vec<ExpandKey> {
        match self {
            ResultTree::Empty => Vec::new(),
            ResultTree::Nice(groups) => groups.iter().map(NiceGroupNode::key).collect(),
            ResultTree::Vienna(categories) => categories
                .iter()
                .flat_map(|c| {
                    std::iter::once(c.key()).chain(c.divisions.iter().map(DivisionNode::key))
                })
                .collect(),
        }
    }
}

fn group_nice<'a>(rows: impl Iterator<Item = &'a NiceEntry>) -> Vec<NiceGroupNode> {
    let mut groups: Vec<NiceGroupNode> = Vec::new();
    let mut index: HashMap<u32, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.group).or_insert_with(|| {
            groups.push(NiceGroupNode {
                group: row.group,
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].entries.push(row.clone());
    }

    groups
}

fn group_vienna<'a>(rows: impl Iterator<Item = &'a ViennaEntry>) -> Vec<CategoryNode> {
    let mut categories: Vec<CategoryNode> = Vec::new();
    let mut category_index: HashMap<u32, usize> = HashMap::new();
    let mut division_index: HashMap<(u32, String), usize> = HashMap::new();

    for row in rows {
        let c = *category_index.entry(row.category).or_insert_with(|| {
            categories.push(CategoryNode {
                category: row.category,
                description: row.category_description.clone(),
                description_en: row.category_description_en.clone(),
                divisions: Vec::new(),
            });
            categories.len() - 1
        });

        let divisions = &mut categories[c].divisions;
        let d = *division_index
            .entry((row.category, row.division.clone()))
            .or_insert_with(|| {
                divisions.push(DivisionNode {
                    category: row.category,
                    division: row.division.clone(),
                    description: row.division_description.clone(),
                    description_en: row.division_description_en.clone(),
                    sections: Vec::new(),
                });
                divisions.len() - 1
            });
        divisions[d].sections.push(row.clone());
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nice(id: &str, group: u32) -> TaxonomyEntry {
        TaxonomyEntry::Nice(NiceEntry {
            id: id.to_string(),
            group,
            code: id.to_string(),
            description: String::new(),
            description_en: None,
        })
    }

    fn section(id: &str, category: u32, division: &str, section: &str) -> TaxonomyEntry {
        TaxonomyEntry::Vienna(ViennaEntry {
            id: id.to_string(),
            category,
            category_description: format!("cat {category}"),
            category_description_en: String::new(),
            division: division.to_string(),
            division_description: format!("div {division}"),
            division_description_en: String::new(),
            section: section.to_string(),
            section_description: String::new(),
            section_description_en: String::new(),
        })
    }

    #[test]
    fn test_empty_results() {
        let tree = ResultTree::build(&[]);
        assert!(tree.is_empty());
        assert!(tree.node_keys().is_empty());
    }

    #[test]
    fn test_nice_groups_in_first_seen_order() {
        let tree = ResultTree::build(&[nice("a", 9), nice("b", 9), nice("c", 35), nice("d", 9)]);
        let ResultTree::Nice(groups) = &tree else {
            panic!("expected a Nice tree");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group, 9);
        let ids: Vec<&str> = groups[0].entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "d"]);
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.node_keys(), vec![ExpandKey::group(9), ExpandKey::group(35)]);
    }

    #[test]
    fn test_vienna_nests_category_division_section() {
        let tree = ResultTree::build(&[
            section("s1", 1, "1.1", "1.1.1"),
            section("s2", 1, "1.1", "1.1.10"),
            section("s3", 1, "1.3", "1.3.1"),
            section("s4", 26, "26.1", "26.1.1"),
        ]);
        let ResultTree::Vienna(categories) = &tree else {
            panic!("expected a Vienna tree");
        };
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].description, "cat 1");
        assert_eq!(categories[0].divisions.len(), 2);

        let sections: Vec<&str> = categories[0].divisions[0]
            .sections
            .iter()
            .map(|s| s.section.as_str())
            .collect();
        assert_eq!(sections, vec!["1.1.1", "1.1.10"]);

        assert_eq!(
            tree.node_keys(),
            vec![
                ExpandKey::category(1),
                ExpandKey::division(1, "1.1"),
                ExpandKey::division(1, "1.3"),
                ExpandKey::category(26),
                ExpandKey::division(26, "26.1"),
            ]
        );
    }

    #[test]
    fn test_same_division_code_under_two_categories() {
        let tree = ResultTree::build(&[section("a", 1, "x", "1"), section("b", 2, "x", "1")]);
        let ResultTree::Vienna(categories) = &tree else {
            panic!("expected a Vienna tree");
        };
        assert_eq!(categories[0].divisions.len(), 1);
        assert_eq!(categories[1].divisions.len(), 1);
    }
}
