//! Dashboard configuration, read from an optional JSON file next to the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "bgg_hotness.json";
pub const DEFAULT_CSV_PATH: &str = "bgg_hotness_history.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub csv_path: PathBuf,
    pub window_title: String,
    pub chart_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            window_title: "BGG Hotness Daily Views".to_string(),
            chart_height: 450.0,
        }
    }
}

impl DashboardConfig {
    /// Load from `path`, falling back to defaults when the file is absent or invalid.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                info!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
        };

        match Self::from_json(&text) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
