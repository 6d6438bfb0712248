//! Board Configuration
//!
//! Runtime settings embedded by the server page as
//! `<script id="board-config" type="application/json">`. Every field is
//! optional; missing ones fall back to the defaults below.

use serde::Deserialize;

use crate::board::DEFAULT_COLUMN_SCROLL_THRESHOLD;
use crate::dom;
use leptos_dragdrop::{DEFAULT_EDGE_THRESHOLD_PX, DEFAULT_STEP_PX, DEFAULT_TICK_MS};

pub const CONFIG_SCRIPT_ID: &str = "board-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Origin of the REST API; empty means the page's own origin
    pub api_base: String,
    pub auto_scroll_threshold_px: f64,
    pub auto_scroll_tick_ms: u32,
    pub auto_scroll_step_px: f64,
    pub column_scroll_threshold: usize,
    pub notification_ms: u32,
    pub semantic_min_query_len: usize,
    pub search_debounce_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            auto_scroll_threshold_px: DEFAULT_EDGE_THRESHOLD_PX,
            auto_scroll_tick_ms: DEFAULT_TICK_MS,
            auto_scroll_step_px: DEFAULT_STEP_PX,
            column_scroll_threshold: DEFAULT_COLUMN_SCROLL_THRESHOLD,
            notification_ms: 3000,
            semantic_min_query_len: 3,
            search_debounce_ms: 300,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Base URL for requests, falling back to `origin`
    pub fn resolved_api_base(&self, origin: &str) -> String {
        let base = if self.api_base.trim().is_empty() { origin } else { self.api_base.trim() };
        base.trim_end_matches('/').to_string()
    }
}

/// Read the page's config block; malformed or missing blocks yield defaults
pub fn load_config() -> BoardConfig {
    match dom::script_text(CONFIG_SCRIPT_ID) {
        Some(json) => BoardConfig::from_json(&json).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed board config: {}", e);
            BoardConfig::default()
        }),
        None => {
            tracing::debug!("no board config block, using defaults");
            BoardConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_yields_defaults() {
        let config = BoardConfig::from_json("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.auto_scroll_threshold_px, 100.0);
        assert_eq!(config.auto_scroll_tick_ms, 16);
        assert_eq!(config.column_scroll_threshold, 4);
        assert_eq!(config.semantic_min_query_len, 3);
    }

    #[test]
    fn test_partial_override() {
        let config = BoardConfig::from_json(r#"{"columnScrollThreshold": 6, "notificationMs": 5000}"#).unwrap();
        assert_eq!(config.column_scroll_threshold, 6);
        assert_eq!(config.notification_ms, 5000);
        assert_eq!(config.auto_scroll_tick_ms, 16);
    }

    #[test]
    fn test_resolved_api_base() {
        let mut config = BoardConfig::default();
        assert_eq!(config.resolved_api_base("https://prizm.example/"), "https://prizm.example");

        config.api_base = "https://api.prizm.example/".to_string();
        assert_eq!(config.resolved_api_base("https://prizm.example"), "https://api.prizm.example");
    }
}
