//! Viewer configuration.
//!
//! Loaded from a small TOML document. Every field has a default matching
//! the source system's behavior, so an absent or partial file is fine.
//!
//! ```toml
//! poll_interval_ms = 500
//! show_details = true
//! decode_labels = true
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use flowline_contracts::{FlowlineError, FlowlineResult};

/// Settings for the live viewers (demo CLI and TUI).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Polling cadence while an exchange is in flight. The source system
    /// polls roughly every 500 ms during an active attempt.
    pub poll_interval_ms: u64,

    /// Whether detail rows are rendered under each message.
    pub show_details: bool,

    /// Whether endpoint labels are decoded for display.
    pub decode_labels: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            show_details: true,
            decode_labels: true,
        }
    }
}

impl ViewerConfig {
    /// Parse `s` as TOML viewer configuration.
    pub fn from_toml_str(s: &str) -> FlowlineResult<Self> {
        toml::from_str(s).map_err(|e| FlowlineError::Config {
            reason: format!("failed to parse viewer config TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as viewer configuration.
    pub fn from_file(path: &Path) -> FlowlineResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FlowlineError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The polling cadence as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerConfig;

    #[test]
    fn defaults_match_the_source_system() {
        let config = ViewerConfig::default();
        assert_eq!(config.poll_interval_ms, 500);
        assert!(config.show_details);
        assert!(config.decode_labels);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config = ViewerConfig::from_toml_str("poll_interval_ms = 250\n").unwrap();
        assert_eq!(config.poll_interval_ms, 250);
        assert!(config.show_details);
        assert!(config.decode_labels);
    }

    #[test]
    fn full_toml_overrides_everything() {
        let config = ViewerConfig::from_toml_str(
            "poll_interval_ms = 100\nshow_details = false\ndecode_labels = false\n",
        )
        .unwrap();
        assert_eq!(config.poll_interval_ms, 100);
        assert!(!config.show_details);
        assert!(!config.decode_labels);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = ViewerConfig::from_toml_str("poll_interval_ms = \"soon\"").unwrap_err();
        assert!(matches!(
            err,
            flowline_contracts::FlowlineError::Config { .. }
        ));
    }
}
