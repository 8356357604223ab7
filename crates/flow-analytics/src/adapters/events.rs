use crate::errors::AnalyticsError;
use crate::model::{ChartKind, QueryDigest};
use crate::ports::EventsPort;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalyticsRuntimeEvent {
    Started {
        chart: ChartKind,
        board: String,
    },
    Fetched {
        count: usize,
        source: String,
    },
    Finished {
        chart: ChartKind,
        ok: bool,
        error: Option<String>,
    },
}

#[derive(Default)]
pub struct NoopEventsPort;

impl EventsPort for NoopEventsPort {
    fn analytics_started(&self, _digest: &QueryDigest) {}

    fn analytics_fetched(&self, _count: usize, _source: &str) {}

    fn analytics_finished(
        &self,
        _digest: &QueryDigest,
        _ok: bool,
        _latency_ms: u128,
        _err: Option<&AnalyticsError>,
    ) {
    }
}

/// Reports the analytics lifecycle through `tracing`.
#[derive(Default)]
pub struct TracingEventsPort;

impl EventsPort for TracingEventsPort {
    fn analytics_started(&self, digest: &QueryDigest) {
        debug!(
            chart = digest.chart.as_str(),
            board = %digest.board,
            scope = ?digest.scope,
            time_unit = ?digest.time_unit,
            "analytics query started"
        );
    }

    fn analytics_fetched(&self, count: usize, source: &str) {
        debug!(count, source, "analytics events fetched");
    }

    fn analytics_finished(
        &self,
        digest: &QueryDigest,
        ok: bool,
        latency_ms: u128,
        err: Option<&AnalyticsError>,
    ) {
        match err {
            None => info!(
                chart = digest.chart.as_str(),
                board = %digest.board,
                ok,
                latency_ms = latency_ms as u64,
                "analytics query finished"
            ),
            Some(err) if err.is_client_error() => info!(
                chart = digest.chart.as_str(),
                board = %digest.board,
                kind = err.kind(),
                latency_ms = latency_ms as u64,
                "analytics query rejected: {err}"
            ),
            Some(err) => warn!(
                chart = digest.chart.as_str(),
                board = %digest.board,
                kind = err.kind(),
                latency_ms = latency_ms as u64,
                "analytics query failed: {err}"
            ),
        }
    }
}

/// Keeps every lifecycle event in memory.
#[derive(Default)]
pub struct RecordingEventsPort {
    events: Mutex<Vec<AnalyticsRuntimeEvent>>,
}

impl RecordingEventsPort {
    pub fn events(&self) -> Vec<AnalyticsRuntimeEvent> {
        self.events.lock().clone()
    }

    fn push(&self, event: AnalyticsRuntimeEvent) {
        self.events.lock().push(event);
    }
}

impl EventsPort for RecordingEventsPort {
    fn analytics_started(&self, digest: &QueryDigest) {
        self.push(AnalyticsRuntimeEvent::Started {
            chart: digest.chart,
            board: digest.board.to_string(),
        });
    }

    fn analytics_fetched(&self, count: usize, source: &str) {
        self.push(AnalyticsRuntimeEvent::Fetched {
            count,
            source: source.to_string(),
        });
    }

    fn analytics_finished(
        &self,
        digest: &QueryDigest,
        ok: bool,
        _latency_ms: u128,
        err: Option<&AnalyticsError>,
    ) {
        self.push(AnalyticsRuntimeEvent::Finished {
            chart: digest.chart,
            ok,
            error: err.map(|e| e.to_string()),
        });
    }
}
