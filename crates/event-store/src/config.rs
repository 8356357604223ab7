use serde::{Deserialize, Serialize};

/// Policy snapshot consumed by the in-memory event log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorePolicyView {
    /// Hard ceiling on events kept per board; appends beyond it are rejected.
    pub max_events_per_board: usize,
}

impl Default for StorePolicyView {
    fn default() -> Self {
        Self {
            max_events_per_board: 1_000_000,
        }
    }
}
