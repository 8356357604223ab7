use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::model::{CountUnit, TimeUnit};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalyticsPolicyView {
    /// Granularity used when a query carries no `time_unit`.
    pub default_time_unit: TimeUnit,
    pub default_count_unit: CountUnit,
    /// Upper bound on buckets walked by one replay, priming buckets included.
    pub max_buckets: usize,
}

impl Default for AnalyticsPolicyView {
    fn default() -> Self {
        Self {
            default_time_unit: TimeUnit::Day,
            default_count_unit: CountUnit::Size,
            max_buckets: 100_000,
        }
    }
}

/// Shared, swappable policy. Handles are injected into the service; there is
/// no process-wide instance.
#[derive(Clone)]
pub struct AnalyticsPolicyHandle {
    inner: Arc<RwLock<AnalyticsPolicyView>>,
}

impl AnalyticsPolicyHandle {
    pub fn new_with(view: AnalyticsPolicyView) -> Self {
        Self {
            inner: Arc::new(RwLock::new(view)),
        }
    }

    pub fn snapshot(&self) -> AnalyticsPolicyView {
        self.inner.read().clone()
    }

    pub fn update(&self, view: AnalyticsPolicyView) {
        *self.inner.write() = view;
    }
}

impl Default for AnalyticsPolicyHandle {
    fn default() -> Self {
        Self::new_with(AnalyticsPolicyView::default())
    }
}

impl crate::ports::PolicyPort for AnalyticsPolicyHandle {
    fn view(&self) -> AnalyticsPolicyView {
        self.snapshot()
    }
}
