//! taxonomy-server - standalone reference-data gateway.
//!
//! Reads config from YAML plus env vars:
//!   TAXONOMY_GATEWAY_CONFIG - YAML path (default: config/taxonomy_gateway.yaml)
//!   TAXONOMY_GATEWAY_ADDR   - listen address (default: 0.0.0.0:4200)
//!   TAXONOMY_DATA_DIR       - directory with the JSON exports (default: data)

use std::sync::Arc;

use anyhow::Context;
use taxonomy_core::{GatewayConfig, TaxonomyStore};
use taxonomy_server::router::build_router;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "taxonomy_server=info,taxonomy_core=info,tower_http=debug".into()
                }),
        )
        .init();

    let config = GatewayConfig::load().context("failed to load gateway configuration")?;

    let store = TaxonomyStore::load(&config.data.dir, config.limits.clone()).with_context(|| {
        format!(
            "failed to load reference data from {}",
            config.data.dir.display()
        )
    })?;

    let app = build_router(Arc::new(store));

    let bind_addr = &config.server.bind_addr;
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    tracing::info!("taxonomy-server listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
