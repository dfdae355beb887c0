use std::time::Duration;

use serde::Deserialize;

use crate::session::SessionOptions;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Catalog service base URL
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// Pause after the last keystroke before a suggestion query, in
    /// milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Grace period before suggestions hide after an input loses focus, in
    /// milliseconds
    #[serde(default = "default_blur_grace_ms")]
    pub blur_grace_ms: u64,

    /// Delay before feedback auto-advances to the next recommendation, in
    /// milliseconds
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,

    /// Maximum suggestions rendered per input slot
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Outbound request timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_catalog_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_blur_grace_ms() -> u64 {
    200
}

fn default_advance_delay_ms() -> u64 {
    1500
}

fn default_suggestion_limit() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            debounce: Duration::from_millis(self.debounce_ms),
            blur_grace: Duration::from_millis(self.blur_grace_ms),
            advance_delay: Duration::from_millis(self.advance_delay_ms),
            suggestion_limit: self.suggestion_limit,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
