use crate::errors::AnalyticsResult;
use crate::ports::EventLogPort;
use futuboard_core_types::{BoardId, Column, Scope, ScopeId, TicketEvent};
use std::borrow::Cow;

/// Everything one chart needs from the event log, fetched up front.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub columns: Vec<Column>,
    pub scopes: Vec<Scope>,
    pub events: Vec<TicketEvent>,
}

pub async fn run_fetch(
    log: &dyn EventLogPort,
    board: BoardId,
    scope: Option<ScopeId>,
    with_scopes: bool,
) -> AnalyticsResult<FetchOutcome> {
    let columns = log.columns(board).await?;
    let scopes = if with_scopes {
        log.scopes(board).await?
    } else {
        Vec::new()
    };
    let events = log.board_events(board, scope).await?;
    Ok(FetchOutcome {
        columns,
        scopes,
        events,
    })
}

pub fn describe_source(scope: Option<ScopeId>) -> Cow<'static, str> {
    match scope {
        Some(scope) => Cow::Owned(format!("event_log:scope:{scope}")),
        None => Cow::Borrowed("event_log:board"),
    }
}
