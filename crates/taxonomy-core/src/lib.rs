//! Taxonomy Core - read-only reference data for the IPMS console
//!
//! Holds the Nice and Vienna classification tables plus the flat reference
//! lists (countries, companies, agencies) used by filing forms. Data is
//! loaded once from JSON exports and never mutated afterwards.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Consumers: taxonomy-server (HTTP), InProcessSource (tests/CLI) │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     TaxonomyStore                               │
//! │      sorted rows + lowercase search fields, capped results      │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Loader (JSON exports)                        │
//! │   nice_groups / nice_classes / vienna_classes / countries ...   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use taxonomy_core::{GatewayConfig, TaxonomyStore};
//!
//! let config = GatewayConfig::load()?;
//! let store = TaxonomyStore::load(&config.data.dir, config.limits.clone())?;
//! let hits = store.search_nice(Some(9), Some("software"));
//! ```

pub mod config;
pub mod error;
pub mod store;

pub use config::{DataConfig, GatewayConfig, Limits, ServerConfig};
pub use error::GatewayError;
pub use store::{documents, StoreBuilder, StoreStats, TaxonomyStore};

pub type Result<T> = std::result::Result<T, GatewayError>;
