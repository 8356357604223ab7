use std::path::PathBuf;

use flow_analytics::AnalyticsPolicyView;
use futuboard_event_store::StorePolicyView;
use serde::{Deserialize, Serialize};

/// Environment variable overriding `data_path`.
pub const DATA_PATH_ENV: &str = "FUTUBOARD_DATA";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board snapshot (JSON) loaded into the event log at startup.
    pub data_path: Option<PathBuf>,
    pub serve: ServeConfig,
    pub analytics: AnalyticsPolicyView,
    pub store: StorePolicyView,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Config {
    /// Snapshot path after applying the command line and environment
    /// overrides, in that order of precedence.
    pub fn resolve_data_path(&self, cli: Option<&PathBuf>) -> Option<PathBuf> {
        cli.cloned()
            .or_else(|| {
                std::env::var(DATA_PATH_ENV)
                    .ok()
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| self.data_path.clone())
    }
}
