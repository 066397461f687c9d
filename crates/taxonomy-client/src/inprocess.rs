//! In-process adapter: direct calls into a loaded store.

use std::sync::Arc;

use async_trait::async_trait;
use ipms_types::{is_valid_nice_group, NiceGroup, TaxonomyEntry, TaxonomyKind, TaxonomyQuery};
use taxonomy_core::{GatewayError, TaxonomyStore};

use crate::{Result, TaxonomySource};

pub struct InProcessSource {
    store: Arc<TaxonomyStore>,
}

impl InProcessSource {
    pub fn new(store: Arc<TaxonomyStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TaxonomySource for InProcessSource {
    async fn list_nice_groups(&self) -> Result<Vec<NiceGroup>> {
        Ok(self.store.nice_groups())
    }

    async fn search(&self, query: &TaxonomyQuery) -> Result<Vec<TaxonomyEntry>> {
        // Same range check the gateway applies to class_number
        if let (TaxonomyKind::Nice, Some(group)) = (query.kind, query.group) {
            if !is_valid_nice_group(group) {
                return Err(GatewayError::InvalidQuery(format!(
                    "class_number {group} is outside the Nice range 1-45"
                ))
                .into());
            }
        }
        Ok(self.store.search(query))
    }
}
