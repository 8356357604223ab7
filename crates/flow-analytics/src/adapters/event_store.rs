use crate::errors::AnalyticsError;
use crate::ports::EventLogPort;
use async_trait::async_trait;
use futuboard_core_types::{BoardId, Column, Scope, ScopeId, TicketEvent};
use futuboard_event_store::{EsError, EsErrorKind, TicketEventStore};
use std::sync::Arc;

pub struct EventStoreAdapter {
    inner: Arc<dyn TicketEventStore>,
}

impl EventStoreAdapter {
    pub fn new(inner: Arc<dyn TicketEventStore>) -> Self {
        Self { inner }
    }

    fn map_err(err: EsError) -> AnalyticsError {
        match err.kind() {
            EsErrorKind::NotFound(what) => AnalyticsError::NotFound(what.clone()),
            _ => AnalyticsError::Store(err.to_string()),
        }
    }
}

#[async_trait]
impl EventLogPort for EventStoreAdapter {
    async fn board_events(
        &self,
        board: BoardId,
        scope: Option<ScopeId>,
    ) -> Result<Vec<TicketEvent>, AnalyticsError> {
        self.inner
            .board_events(board, scope)
            .await
            .map_err(Self::map_err)
    }

    async fn columns(&self, board: BoardId) -> Result<Vec<Column>, AnalyticsError> {
        self.inner.columns(board).await.map_err(Self::map_err)
    }

    async fn scopes(&self, board: BoardId) -> Result<Vec<Scope>, AnalyticsError> {
        self.inner.scopes(board).await.map_err(Self::map_err)
    }

    async fn scope(&self, scope: ScopeId) -> Result<Scope, AnalyticsError> {
        self.inner.scope(scope).await.map_err(Self::map_err)
    }
}
