//! TaxonomySource - the sole lookup boundary between the picker and the
//! reference data. The console depends on this crate, never on the
//! gateway's router.

pub mod http;
pub mod inprocess;

use async_trait::async_trait;
use ipms_types::{NiceGroup, TaxonomyEntry, TaxonomyQuery};
use taxonomy_core::GatewayError;

pub use http::HttpSource;
pub use inprocess::InProcessSource;

pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("gateway returned {0}: {1}")]
    Status(u16, String),

    #[error("gateway rejected request: {0}")]
    Rejected(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error(transparent)]
    Store(#[from] GatewayError),
}

#[async_trait]
pub trait TaxonomySource: Send + Sync {
    /// Nice groups 1-45, in group order.
    async fn list_nice_groups(&self) -> Result<Vec<NiceGroup>>;

    /// Leaf entries matching `query`, in collaborator order
    /// (group/category, then division/class code).
    async fn search(&self, query: &TaxonomyQuery) -> Result<Vec<TaxonomyEntry>>;
}
