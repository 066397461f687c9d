//! Picker configuration
//!
//! Environment variables (a `.env` file is honoured by the binaries):
//!
//! - `IPMS_DEBOUNCE_MS` - input inactivity before a query is issued (default 500)
//! - `IPMS_GATEWAY_URL` - taxonomy gateway root, e.g. `http://localhost:4200`

use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    pub debounce: Duration,
    pub gateway_url: Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            gateway_url: None,
        }
    }
}

impl PickerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("IPMS_DEBOUNCE_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.debounce = Duration::from_millis(ms),
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid IPMS_DEBOUNCE_MS"),
            }
        }

        config.gateway_url = lookup("IPMS_GATEWAY_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        config
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}
