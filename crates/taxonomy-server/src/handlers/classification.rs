//! Classification lookup handlers.
//!
//! GET /api/reference/nice-groups                                  - all Nice groups
//! GET /api/reference/nice-classes?class_number=&search=           - Nice classes, flat + grouped
//! GET /api/reference/vienna-classes?search=&category=             - Vienna sections
//!
//! Numeric filters arrive as strings so a malformed value is answered with
//! the error envelope instead of a bare extractor rejection.

use std::sync::Arc;

use axum::{extract::Query, Extension, Json};
use ipms_types::{is_valid_nice_group, ApiResponse, NiceClassesPayload, NiceGroup, ViennaEntry};
use serde::Deserialize;
use taxonomy_core::{GatewayError, TaxonomyStore};

use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct NiceClassesParams {
    pub class_number: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViennaClassesParams {
    pub search: Option<String>,
    pub category: Option<String>,
}

pub async fn nice_groups(
    Extension(store): Extension<Arc<TaxonomyStore>>,
) -> Json<ApiResponse<Vec<NiceGroup>>> {
    Json(ApiResponse::ok(store.nice_groups()))
}

pub async fn nice_classes(
    Extension(store): Extension<Arc<TaxonomyStore>>,
    Query(params): Query<NiceClassesParams>,
) -> Result<Json<ApiResponse<NiceClassesPayload>>, AppError> {
    let group = parse_number("class_number", params.class_number.as_deref())?;
    if let Some(group) = group {
        if !is_valid_nice_group(group) {
            return Err(GatewayError::InvalidQuery(format!(
                "class_number {group} is outside the Nice range 1-45"
            ))
            .into());
        }
    }

    let items = store.search_nice(group, params.search.as_deref());
    tracing::debug!(group = ?group, search = ?params.search, hits = items.len(), "Nice lookup");

    Ok(Json(ApiResponse::ok(NiceClassesPayload::from_items(items))))
}

pub async fn vienna_classes(
    Extension(store): Extension<Arc<TaxonomyStore>>,
    Query(params): Query<ViennaClassesParams>,
) -> Result<Json<ApiResponse<Vec<ViennaEntry>>>, AppError> {
    let category = parse_number("category", params.category.as_deref())?;

    let items = store.search_vienna(category, params.search.as_deref());
    tracing::debug!(
        category = ?category,
        search = ?params.search,
        hits = items.len(),
        "Vienna lookup"
    );

    Ok(Json(ApiResponse::ok(items)))
}

/// Blank means "no filter"; anything else must be a positive integer.
fn parse_number(name: &str, raw: Option<&str>) -> Result<Option<u32>, GatewayError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(GatewayError::InvalidQuery(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}
