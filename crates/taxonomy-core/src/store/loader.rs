//! JSON export loading.
//!
//! Each collection is one file holding a JSON array of documents. A missing
//! file is an empty collection; a file that exists but does not parse is an
//! error, so a truncated export never silently serves partial data.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::Result;

pub const NICE_GROUPS_FILE: &str = "nice_groups.json";
pub const NICE_CLASSES_FILE: &str = "nice_classes.json";
pub const VIENNA_CLASSES_FILE: &str = "vienna_classes.json";
pub const COUNTRIES_FILE: &str = "countries.json";
pub const COMPANIES_FILE: &str = "companies.json";
pub const AGENCIES_FILE: &str = "agencies.json";

pub fn load_collection<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
) -> Result<Vec<T>> {
    let path: PathBuf = dir.join(file);

    if !path.exists() {
        tracing::warn!(path = %path.display(), "Collection export missing, serving empty list");
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| GatewayError::Io {
        path: path.clone(),
        source,
    })?;

    let docs: Vec<T> = serde_json::from_str(&content).map_err(|source| GatewayError::Parse {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), rows = docs.len(), "Collection loaded");
    Ok(docs)
}
