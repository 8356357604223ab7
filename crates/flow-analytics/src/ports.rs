use crate::errors::AnalyticsError;
use crate::model::QueryDigest;
use crate::policy::AnalyticsPolicyView;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futuboard_core_types::{BoardId, Column, Scope, ScopeId, TicketEvent};

/// Read-only access to the storage collaborator.
#[async_trait]
pub trait EventLogPort: Send + Sync {
    /// Events touching any column of the board (and `scope`, when given),
    /// in non-decreasing event time with ties in log order.
    async fn board_events(
        &self,
        board: BoardId,
        scope: Option<ScopeId>,
    ) -> Result<Vec<TicketEvent>, AnalyticsError>;
    /// Columns ordered by `ordernum`.
    async fn columns(&self, board: BoardId) -> Result<Vec<Column>, AnalyticsError>;
    async fn scopes(&self, board: BoardId) -> Result<Vec<Scope>, AnalyticsError>;
    async fn scope(&self, scope: ScopeId) -> Result<Scope, AnalyticsError>;
}

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait PolicyPort: Send + Sync {
    fn view(&self) -> AnalyticsPolicyView;
}

pub trait EventsPort: Send + Sync {
    fn analytics_started(&self, digest: &QueryDigest);
    fn analytics_fetched(&self, count: usize, source: &str);
    fn analytics_finished(
        &self,
        digest: &QueryDigest,
        ok: bool,
        latency_ms: u128,
        err: Option<&AnalyticsError>,
    );
}
