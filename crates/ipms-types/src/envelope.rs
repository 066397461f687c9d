//! Response envelope shared by every reference-data route.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classification::NiceEntry;

/// `{ "success": bool, "data": T?, "message": string? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Unwrap the envelope, turning `success: false` into its message.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("response carried no data".to_string()),
            (false, _) => Err(self
                .message
                .unwrap_or_else(|| "request was not successful".to_string())),
        }
    }
}

/// Payload of the Nice classes route: the flat list plus the same rows
/// grouped by Nice group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NiceClassesPayload {
    pub items: Vec<NiceEntry>,
    #[serde(default)]
    pub grouped: BTreeMap<u32, Vec<NiceEntry>>,
}

impl NiceClassesPayload {
    pub fn from_items(items: Vec<NiceEntry>) -> Self {
        let mut grouped: BTreeMap<u32, Vec<NiceEntry>> = BTreeMap::new();
        for item in &items {
            grouped.entry(item.group).or_default().push(item.clone());
        }
        Self { items, grouped }
    }
}
