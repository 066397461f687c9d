//! HTTP adapter against the taxonomy gateway.

use std::time::Duration;

use async_trait::async_trait;
use ipms_types::{
    ApiResponse, NiceClassesPayload, NiceGroup, TaxonomyEntry, TaxonomyKind, TaxonomyQuery,
    ViennaEntry,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{Result, SourceError, TaxonomySource};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct HttpSource {
    http: Client,
    base_url: String,
}

impl HttpSource {
    /// `base_url` is the gateway root, e.g. `http://localhost:4200`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, params = query.len(), "Taxonomy gateway request");

        let response = self.http.get(&url).query(query).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Taxonomy gateway unreachable");
            SourceError::from(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            // Failed envelopes still carry a message worth keeping
            let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&bytes)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| {
                    String::from_utf8_lossy(&bytes)
                        .chars()
                        .take(200)
                        .collect()
                });
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                message = %message,
                "Taxonomy gateway request failed"
            );
            return Err(SourceError::Status(status.as_u16(), message));
        }

        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)
            .map_err(|e| SourceError::Decode(format!("{path}: {e}")))?;
        envelope.into_result().map_err(SourceError::Rejected)
    }
}

#[async_trait]
impl TaxonomySource for HttpSource {
    async fn list_nice_groups(&self) -> Result<Vec<NiceGroup>> {
        self.get("/api/reference/nice-groups", &[]).await
    }

    async fn search(&self, query: &TaxonomyQuery) -> Result<Vec<TaxonomyEntry>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(text) = &query.text {
            params.push(("search", text.clone()));
        }

        match query.kind {
            TaxonomyKind::Nice => {
                if let Some(group) = query.group {
                    params.push(("class_number", group.to_string()));
                }
                let payload: NiceClassesPayload =
                    self.get("/api/reference/nice-classes", &params).await?;
                Ok(payload.items.into_iter().map(TaxonomyEntry::Nice).collect())
            }
            TaxonomyKind::Vienna => {
                if let Some(category) = query.group {
                    params.push(("category", category.to_string()));
                }
                let items: Vec<ViennaEntry> =
                    self.get("/api/reference/vienna-classes", &params).await?;
                Ok(items.into_iter().map(TaxonomyEntry::Vienna).collect())
            }
        }
    }
}
