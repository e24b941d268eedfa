//! Menu configuration knobs.
//!
//! Plain-data fields load from JSON with per-field defaults; runtime handles
//! (logger, metrics) are attached in code.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::Button;
use crate::logging::Logger;
use crate::metrics::MenuMetrics;

/// Number of text lines the target display shows at once.
pub const DEFAULT_LINES_PER_SCREEN: usize = 8;
pub const DEFAULT_CURSOR_CHAR: char = '█';

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Lines shown per page when `enforce_max_lines` is on.
    pub lines_per_screen: usize,
    /// Page the displayable elements instead of emitting all of them.
    pub enforce_max_lines: bool,
    /// Interval between cursor blink phase toggles.
    pub blink_interval_ms: u64,
    pub cursor_char: char,
    /// Fixed width of every menu's selection zone.
    pub zone_width: usize,
    pub tick_priority: i32,
    pub blink_priority: i32,
    /// Per-button event priority; unlisted buttons use zero.
    pub input_priorities: BTreeMap<Button, i32>,
    /// Buttons sampled for edge events each frame.
    pub tracked_inputs: Vec<Button>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval_ms: u64,
    /// Optional structured logger used by menus and the GUI context.
    #[serde(skip)]
    pub logger: Option<Logger>,
    /// Metrics accumulator shared by every menu of a session.
    #[serde(skip)]
    pub metrics: Option<Arc<Mutex<MenuMetrics>>>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            lines_per_screen: DEFAULT_LINES_PER_SCREEN,
            enforce_max_lines: true,
            blink_interval_ms: 500,
            cursor_char: DEFAULT_CURSOR_CHAR,
            zone_width: 20,
            tick_priority: 0,
            blink_priority: 0,
            input_priorities: BTreeMap::new(),
            tracked_inputs: Button::ALL.to_vec(),
            metrics_interval_ms: 0,
            logger: None,
            metrics: None,
        }
    }
}

impl MenuConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }

    pub fn metrics_interval(&self) -> Duration {
        Duration::from_millis(self.metrics_interval_ms)
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(MenuMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<MenuMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_display() {
        let config = MenuConfig::default();
        assert_eq!(config.lines_per_screen, 8);
        assert!(config.enforce_max_lines);
        assert_eq!(config.blink_interval(), Duration::from_millis(500));
        assert_eq!(config.tracked_inputs.len(), Button::ALL.len());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MenuConfig::from_json_str(
            r#"{ "lines_per_screen": 4, "input_priorities": { "dpad_up": 5 } }"#,
        )
        .unwrap();
        assert_eq!(config.lines_per_screen, 4);
        assert_eq!(config.input_priorities.get(&Button::DpadUp), Some(&5));
        assert_eq!(config.cursor_char, DEFAULT_CURSOR_CHAR);
        assert!(config.logger.is_none());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = MenuConfig::from_json_str("{ nope").err().unwrap();
        assert!(matches!(err, crate::MenuError::Config(_)));
    }

    #[test]
    fn metrics_enable_once() {
        let mut config = MenuConfig::default();
        config.enable_metrics();
        let first = config.metrics_handle().unwrap();
        config.enable_metrics();
        assert!(Arc::ptr_eq(&first, &config.metrics_handle().unwrap()));
    }
}
