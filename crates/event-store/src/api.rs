use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use futuboard_core_types::{
    Board, BoardId, Column, ColumnId, Scope, ScopeForecast, ScopeId, TicketEvent,
};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::StorePolicyView;
use crate::errors::{EsError, EsErrorKind, EsResult};
use crate::idempotency::IdempotencyTracker;
use crate::model::AppendAck;
use crate::read::query;
use crate::snapshot::BoardSnapshot;

pub type EventStoreResult<T> = EsResult<T>;

/// Storage collaborator for boards, their columns and scopes, and the ticket
/// event log.
#[async_trait]
pub trait TicketEventStore: Send + Sync {
    async fn put_board(&self, board: Board) -> EventStoreResult<()>;
    async fn put_column(&self, column: Column) -> EventStoreResult<()>;
    async fn put_scope(&self, scope: Scope) -> EventStoreResult<()>;
    async fn append(&self, event: TicketEvent) -> EventStoreResult<AppendAck>;

    async fn board(&self, board_id: BoardId) -> EventStoreResult<Board>;
    /// Columns of the board ordered by `ordernum`.
    async fn columns(&self, board_id: BoardId) -> EventStoreResult<Vec<Column>>;
    async fn scopes(&self, board_id: BoardId) -> EventStoreResult<Vec<Scope>>;
    async fn scope(&self, scope_id: ScopeId) -> EventStoreResult<Scope>;
    /// Events touching any column of the board, ordered by event time.
    async fn board_events(
        &self,
        board_id: BoardId,
        scope: Option<ScopeId>,
    ) -> EventStoreResult<Vec<TicketEvent>>;

    /// Freezes the scope's live tickets and their sizes as of `at` into its
    /// forecast, replacing any earlier one.
    async fn set_scope_forecast(
        &self,
        scope_id: ScopeId,
        at: DateTime<Utc>,
    ) -> EventStoreResult<ScopeForecast>;
}

pub struct InMemoryEventStore {
    policy: StorePolicyView,
    boards: DashMap<BoardId, Board>,
    columns: DashMap<ColumnId, Column>,
    scopes: DashMap<ScopeId, Scope>,
    log: RwLock<Vec<TicketEvent>>,
    board_lens: DashMap<BoardId, usize>,
    idempotency: IdempotencyTracker,
}

impl InMemoryEventStore {
    pub fn new(policy: StorePolicyView) -> Arc<Self> {
        Arc::new(Self {
            policy,
            boards: DashMap::new(),
            columns: DashMap::new(),
            scopes: DashMap::new(),
            log: RwLock::new(Vec::new()),
            board_lens: DashMap::new(),
            idempotency: IdempotencyTracker::default(),
        })
    }

    /// Loads a board snapshot. Columns and scopes go in before events so the
    /// events can be attributed to the board.
    pub async fn load_snapshot(&self, snapshot: BoardSnapshot) -> EventStoreResult<usize> {
        let BoardSnapshot {
            board,
            columns,
            scopes,
            events,
        } = snapshot;
        let board_id = board.board_id;
        self.put_board(board).await?;
        for column in columns {
            self.put_column(column).await?;
        }
        for scope in scopes {
            self.put_scope(scope).await?;
        }
        let total = events.len();
        for event in events {
            self.append(event).await?;
        }
        info!(board = %board_id, events = total, "loaded board snapshot");
        Ok(total)
    }

    fn board_of_event(&self, event: &TicketEvent) -> Option<BoardId> {
        [event.new_column, event.old_column]
            .into_iter()
            .flatten()
            .find_map(|col| self.columns.get(&col).map(|c| c.board_id))
    }

    fn board_column_ids(&self, board_id: BoardId) -> HashSet<ColumnId> {
        self.columns
            .iter()
            .filter(|entry| entry.board_id == board_id)
            .map(|entry| entry.column_id)
            .collect()
    }

    fn ensure_board(&self, board_id: BoardId) -> EventStoreResult<()> {
        if self.boards.contains_key(&board_id) {
            Ok(())
        } else {
            Err(EsErrorKind::NotFound(format!("board {board_id}")).into())
        }
    }
}

#[async_trait]
impl TicketEventStore for InMemoryEventStore {
    async fn put_board(&self, board: Board) -> EventStoreResult<()> {
        self.boards.insert(board.board_id, board);
        Ok(())
    }

    async fn put_column(&self, column: Column) -> EventStoreResult<()> {
        self.ensure_board(column.board_id)?;
        self.columns.insert(column.column_id, column);
        Ok(())
    }

    async fn put_scope(&self, scope: Scope) -> EventStoreResult<()> {
        self.ensure_board(scope.board_id)?;
        self.scopes.insert(scope.scope_id, scope);
        Ok(())
    }

    async fn append(&self, event: TicketEvent) -> EventStoreResult<AppendAck> {
        if event.old_column.is_none() && event.new_column.is_none() {
            return Err(EsErrorKind::AppendRejected(format!(
                "event {} references no column",
                event.event_id
            ))
            .into());
        }
        let limit = self.policy.max_events_per_board;
        let board_id = self.board_of_event(&event).ok_or_else(|| {
            warn!(event = %event.event_id, "event references unknown columns");
            EsError::from(EsErrorKind::AppendRejected(format!(
                "event {} references unknown columns",
                event.event_id
            )))
        })?;

        if !self.idempotency.accept(event.event_id) {
            return Err(EsErrorKind::DuplicateEvent(event.event_id).into());
        }

        let board_len = {
            let mut len = self.board_lens.entry(board_id).or_insert(0);
            if *len >= limit {
                drop(len);
                self.idempotency.forget(&event.event_id);
                return Err(EsErrorKind::AppendRejected(format!(
                    "board {board_id} already holds {limit} events"
                ))
                .into());
            }
            *len += 1;
            *len
        };

        self.log.write().push(event.clone());
        debug!(board = %board_id, event = %event.event_id, kind = %event.kind, "ticket event appended");

        Ok(AppendAck {
            event_id: event.event_id,
            board_id,
            board_len,
        })
    }

    async fn board(&self, board_id: BoardId) -> EventStoreResult<Board> {
        self.boards
            .get(&board_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| EsErrorKind::NotFound(format!("board {board_id}")).into())
    }

    async fn columns(&self, board_id: BoardId) -> EventStoreResult<Vec<Column>> {
        self.ensure_board(board_id)?;
        let mut columns: Vec<Column> = self
            .columns
            .iter()
            .filter(|entry| entry.board_id == board_id)
            .map(|entry| entry.clone())
            .collect();
        columns.sort_by(|a, b| {
            a.ordernum
                .cmp(&b.ordernum)
                .then_with(|| a.column_id.cmp(&b.column_id))
        });
        Ok(columns)
    }

    async fn scopes(&self, board_id: BoardId) -> EventStoreResult<Vec<Scope>> {
        self.ensure_board(board_id)?;
        let mut scopes: Vec<Scope> = self
            .scopes
            .iter()
            .filter(|entry| entry.board_id == board_id)
            .map(|entry| entry.clone())
            .collect();
        scopes.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.scope_id.cmp(&b.scope_id)));
        Ok(scopes)
    }

    async fn scope(&self, scope_id: ScopeId) -> EventStoreResult<Scope> {
        self.scopes
            .get(&scope_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| EsErrorKind::NotFound(format!("scope {scope_id}")).into())
    }

    /// Freezes the scope's current tickets and their sizes as its forecast.
    /// A previous forecast is overwritten.
    async fn set_scope_forecast(
        &self,
        scope_id: ScopeId,
        at: DateTime<Utc>,
    ) -> EventStoreResult<ScopeForecast> {
        let scope = self.scope(scope_id).await?;
        let events = self.board_events(scope.board_id, None).await?;
        let sizes = query::latest_ticket_sizes(&events, at);

        let tickets: BTreeSet<_> = scope
            .tickets
            .iter()
            .filter(|ticket| sizes.contains_key(ticket))
            .copied()
            .collect();
        let size = tickets.iter().filter_map(|ticket| sizes.get(ticket)).sum();
        let forecast = ScopeForecast {
            set_at: at,
            size,
            tickets,
        };

        let mut entry = self.scopes.get_mut(&scope_id).ok_or_else(|| {
            EsError::from(EsErrorKind::NotFound(format!("scope {scope_id}")))
        })?;
        entry.forecast = Some(forecast.clone());
        debug!(scope = %scope_id, size = forecast.size, "scope forecast set");
        Ok(forecast)
    }

    async fn board_events(
        &self,
        board_id: BoardId,
        scope: Option<ScopeId>,
    ) -> EventStoreResult<Vec<TicketEvent>> {
        self.ensure_board(board_id)?;
        let columns = self.board_column_ids(board_id);
        let log = self.log.read();
        Ok(query::board_events(log.iter(), &columns, scope.as_ref()))
    }
}
