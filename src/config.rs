//! App Configuration
//!
//! Optional overrides saved as JSON under the `laneboard.config`
//! localStorage key. Every field has a default.

use leptos_reorder::DndConfig;
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::repository::{Backend, BrowserStorage, StoreResult};

pub const CONFIG_KEY: &str = "laneboard.config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// localStorage key holding the dataset
    pub storage_key: String,
    /// trace, debug, info, warn or error
    pub log_level: String,
    /// How long a notification stays up
    pub notification_timeout_ms: u32,
    /// Pointer travel before a press becomes a drag; 0 means any movement
    pub move_threshold_px: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: "laneboard.data".to_string(),
            log_level: "info".to_string(),
            notification_timeout_ms: 4000,
            move_threshold_px: 0.0,
        }
    }
}

impl AppConfig {
    /// Saved overrides, if any
    pub fn read() -> StoreResult<Option<Self>> {
        let storage = BrowserStorage::open()?;
        match storage.read(CONFIG_KEY)? {
            Some(json) => Ok(Some(Self::from_json(&json)?)),
            None => Ok(None),
        }
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Configured level, `INFO` when unrecognised
    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    pub fn dnd(&self) -> DndConfig {
        DndConfig {
            move_threshold_px: self.move_threshold_px.max(0.0),
            ..DndConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"log_level": "debug"}"#).unwrap();
        assert_eq!(config.level(), Level::DEBUG);
        assert_eq!(config.storage_key, "laneboard.data");
        assert_eq!(config.notification_timeout_ms, 4000);
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let config = AppConfig { log_level: "chatty".into(), ..Default::default() };
        assert_eq!(config.level(), Level::INFO);
    }

    #[test]
    fn test_negative_threshold_clamped() {
        let config = AppConfig { move_threshold_px: -3.0, ..Default::default() };
        assert_eq!(config.dnd().move_threshold_px, 0.0);
        assert_eq!(config.dnd().order_step, leptos_reorder::ORDER_STEP);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(AppConfig::from_json("log_level=debug").is_err());
    }
}
