//! In-memory reference store.
//!
//! Rows are sorted once at build time, so every query returns them in the
//! stable order consumers rely on:
//!
//! - Nice groups by group number
//! - Nice classes by (group, code)
//! - Vienna sections by (category, division, section)
//! - countries by country name, companies and agencies by name

pub mod documents;
pub mod loader;
mod search;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use ipms_types::{
    CountryOption, NiceEntry, NiceGroup, PartyOption, TaxonomyEntry, TaxonomyKind, TaxonomyQuery,
    ViennaEntry,
};

use crate::config::Limits;
use crate::Result;
use documents::{
    CountryDocument, NiceClassDocument, NiceGroupDocument, PartyDocument, ViennaClassDocument,
};
use search::{normalize_needle, SearchRow};

/// Row counts per collection, reported by the health route.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub nice_groups: usize,
    pub nice_classes: usize,
    pub vienna_classes: usize,
    pub countries: usize,
    pub companies: usize,
    pub agencies: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Read-only classification and reference-list store.
pub struct TaxonomyStore {
    nice_groups: Vec<NiceGroup>,
    nice_classes: Vec<SearchRow<NiceEntry>>,
    vienna_classes: Vec<SearchRow<ViennaEntry>>,
    countries: Vec<CountryOption>,
    companies: Vec<PartyOption>,
    agencies: Vec<PartyOption>,
    limits: Limits,
    loaded_at: DateTime<Utc>,
}

impl TaxonomyStore {
    /// Load every collection export found in `dir`.
    pub fn load(dir: impl AsRef<Path>, limits: Limits) -> Result<Self> {
        let dir = dir.as_ref();
        tracing::info!(dir = %dir.display(), "Loading reference data");

        let store = StoreBuilder::new()
            .nice_groups(loader::load_collection(dir, loader::NICE_GROUPS_FILE)?)
            .nice_classes(loader::load_collection(dir, loader::NICE_CLASSES_FILE)?)
            .vienna_classes(loader::load_collection(dir, loader::VIENNA_CLASSES_FILE)?)
            .countries(loader::load_collection(dir, loader::COUNTRIES_FILE)?)
            .companies(loader::load_collection(dir, loader::COMPANIES_FILE)?)
            .agencies(loader::load_collection(dir, loader::AGENCIES_FILE)?)
            .build(limits);

        let stats = store.stats();
        tracing::info!(
            nice_groups = stats.nice_groups,
            nice_classes = stats.nice_classes,
            vienna_classes = stats.vienna_classes,
            countries = stats.countries,
            companies = stats.companies,
            agencies = stats.agencies,
            "Reference data loaded"
        );

        Ok(store)
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            nice_groups: self.nice_groups.len(),
            nice_classes: self.nice_classes.len(),
            vienna_classes: self.vienna_classes.len(),
            countries: self.countries.len(),
            companies: self.companies.len(),
            agencies: self.agencies.len(),
            loaded_at: self.loaded_at,
        }
    }

    // ── Classifications ──

    pub fn nice_groups(&self) -> Vec<NiceGroup> {
        self.nice_groups
            .iter()
            .take(self.limits.reference_lists)
            .cloned()
            .collect()
    }

    /// Nice classes in `group` (when given) whose descriptions or code
    /// contain `text` (when given).
    pub fn search_nice(&self, group: Option<u32>, text: Option<&str>) -> Vec<NiceEntry> {
        let needle = normalize_needle(text);
        self.nice_classes
            .iter()
            .filter(|r| group.map_or(true, |g| r.row.group == g))
            .filter(|r| needle.as_deref().map_or(true, |n| r.matches(n)))
            .take(self.limits.nice_classes)
            .map(|r| r.row.clone())
            .collect()
    }

    /// Vienna sections in `category` (when given) whose category, division
    /// or section descriptions contain `text` (when given).
    pub fn search_vienna(&self, category: Option<u32>, text: Option<&str>) -> Vec<ViennaEntry> {
        let needle = normalize_needle(text);
        self.vienna_classes
            .iter()
            .filter(|r| category.map_or(true, |c| r.row.category == c))
            .filter(|r| needle.as_deref().map_or(true, |n| r.matches(n)))
            .take(self.limits.vienna_classes)
            .map(|r| r.row.clone())
            .collect()
    }

    pub fn search(&self, query: &TaxonomyQuery) -> Vec<TaxonomyEntry> {
        match query.kind {
            TaxonomyKind::Nice => self
                .search_nice(query.group, query.text.as_deref())
                .into_iter()
                .map(TaxonomyEntry::Nice)
                .collect(),
            TaxonomyKind::Vienna => self
                .search_vienna(query.group, query.text.as_deref())
                .into_iter()
                .map(TaxonomyEntry::Vienna)
                .collect(),
        }
    }

    // ── Flat reference lists ──

    pub fn countries(&self) -> Vec<CountryOption> {
        capped(&self.countries, self.limits.reference_lists)
    }

    pub fn companies(&self) -> Vec<PartyOption> {
        capped(&self.companies, self.limits.reference_lists)
    }

    pub fn agencies(&self) -> Vec<PartyOption> {
        capped(&self.agencies, self.limits.reference_lists)
    }
}

fn capped<T: Clone>(rows: &[T], limit: usize) -> Vec<T> {
    rows.iter().take(limit).cloned().collect()
}

/// Assembles a [`TaxonomyStore`] from raw documents.
#[derive(Default)]
pub struct StoreBuilder {
    nice_groups: Vec<NiceGroupDocument>,
    nice_classes: Vec<NiceClassDocument>,
    vienna_classes: Vec<ViennaClassDocument>,
    countries: Vec<CountryDocument>,
    companies: Vec<PartyDocument>,
    agencies: Vec<PartyDocument>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nice_groups(mut self, docs: Vec<NiceGroupDocument>) -> Self {
        self.nice_groups = docs;
        self
    }

    pub fn nice_classes(mut self, docs: Vec<NiceClassDocument>) -> Self {
        self.nice_classes = docs;
        self
    }

    pub fn vienna_classes(mut self, docs: Vec<ViennaClassDocument>) -> Self {
        self.vienna_classes = docs;
        self
    }

    pub fn countries(mut self, docs: Vec<CountryDocument>) -> Self {
        self.countries = docs;
        self
    }

    pub fn companies(mut self, docs: Vec<PartyDocument>) -> Self {
        self.companies = docs;
        self
    }

    pub fn agencies(mut self, docs: Vec<PartyDocument>) -> Self {
        self.agencies = docs;
        self
    }

    pub fn build(self, limits: Limits) -> TaxonomyStore {
        let mut nice_groups: Vec<NiceGroup> = self
            .nice_groups
            .into_iter()
            .map(NiceGroupDocument::into_group)
            .collect();
        nice_groups.sort_by_key(|g| g.group);

        let mut nice_classes: Vec<NiceEntry> = self
            .nice_classes
            .into_iter()
            .map(NiceClassDocument::into_entry)
            .collect();
        nice_classes.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| a.code.cmp(&b.code)));
        let nice_classes = nice_classes.into_iter().map(SearchRow::new).collect();

        let mut vienna_classes: Vec<ViennaEntry> = self
            .vienna_classes
            .into_iter()
            .map(ViennaClassDocument::into_entry)
            .collect();
        vienna_classes.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.division.cmp(&b.division))
                .then_with(|| a.section.cmp(&b.section))
        });
        let vienna_classes = vienna_classes.into_iter().map(SearchRow::new).collect();

        let mut countries = self.countries;
        countries.sort_by(|a, b| a.country_name.cmp(&b.country_name));

        let mut companies = self.companies;
        companies.sort_by(|a, b| a.name.cmp(&b.name));

        let mut agencies = self.agencies;
        agencies.sort_by(|a, b| a.name.cmp(&b.name));

        TaxonomyStore {
            nice_groups,
            nice_classes,
            vienna_classes,
            countries: countries.into_iter().map(CountryDocument::into_option).collect(),
            companies: companies.into_iter().map(PartyDocument::into_option).collect(),
            agencies: agencies.into_iter().map(PartyDocument::into_option).collect(),
            limits,
            loaded_at: Utc::now(),
        }
    }
}
