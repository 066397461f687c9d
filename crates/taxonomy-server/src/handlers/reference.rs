//! Flat select-list handlers for filing forms.

use std::sync::Arc;

use axum::{Extension, Json};
use ipms_types::{ApiResponse, CountryOption, PartyOption};
use taxonomy_core::TaxonomyStore;

pub async fn countries(
    Extension(store): Extension<Arc<TaxonomyStore>>,
) -> Json<ApiResponse<Vec<CountryOption>>> {
    Json(ApiResponse::ok(store.countries()))
}

pub async fn companies(
    Extension(store): Extension<Arc<TaxonomyStore>>,
) -> Json<ApiResponse<Vec<PartyOption>>> {
    Json(ApiResponse::ok(store.companies()))
}

pub async fn agencies(
    Extension(store): Extension<Arc<TaxonomyStore>>,
) -> Json<ApiResponse<Vec<PartyOption>>> {
    Json(ApiResponse::ok(store.agencies()))
}
