//! Router construction for the taxonomy gateway.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use taxonomy_core::TaxonomyStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;

/// Build the full axum router with all routes and middleware.
pub fn build_router(store: Arc<TaxonomyStore>) -> Router {
    let reference = Router::new()
        // Classifications
        .route("/nice-groups", get(handlers::classification::nice_groups))
        .route("/nice-classes", get(handlers::classification::nice_classes))
        .route(
            "/vienna-classes",
            get(handlers::classification::vienna_classes),
        )
        // Filing select lists
        .route("/countries", get(handlers::reference::countries))
        .route("/companies", get(handlers::reference::companies))
        .route("/agencies", get(handlers::reference::agencies));

    Router::new()
        .route("/api/health", get(handlers::health::health))
        .nest("/api/reference", reference)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .layer(Extension(store))
}
