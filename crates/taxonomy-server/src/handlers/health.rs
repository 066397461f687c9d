//! GET /api/health

use std::sync::Arc;

use axum::{Extension, Json};
use ipms_types::ApiResponse;
use taxonomy_core::{StoreStats, TaxonomyStore};

pub async fn health(
    Extension(store): Extension<Arc<TaxonomyStore>>,
) -> Json<ApiResponse<StoreStats>> {
    Json(ApiResponse::ok(store.stats()))
}
