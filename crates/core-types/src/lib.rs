use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Raised when an identifier string is not a UUID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind} identifier: {value}")]
pub struct IdParseError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde-full", serde(transparent))]
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| IdParseError {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }
    };
}

uuid_id!(BoardId, "board");
uuid_id!(ColumnId, "column");
uuid_id!(ScopeId, "scope");
uuid_id!(TicketId, "ticket");
uuid_id!(
    /// Identifier of one row in the ticket event log.
    TicketEventId,
    "ticket event"
);

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    #[cfg_attr(feature = "serde-full", serde(rename = "boardid"))]
    pub board_id: BoardId,
    pub title: String,
}

/// A board column. Titles are not unique within a board.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Column {
    #[cfg_attr(feature = "serde-full", serde(rename = "columnid"))]
    pub column_id: ColumnId,
    #[cfg_attr(feature = "serde-full", serde(rename = "boardid"))]
    pub board_id: BoardId,
    pub title: String,
    pub ordernum: i32,
}

/// Frozen snapshot of a scope, taken when a user sets the forecast.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScopeForecast {
    pub set_at: DateTime<Utc>,
    pub size: i64,
    pub tickets: BTreeSet<TicketId>,
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scope {
    #[cfg_attr(feature = "serde-full", serde(rename = "scopeid"))]
    pub scope_id: ScopeId,
    #[cfg_attr(feature = "serde-full", serde(rename = "boardid"))]
    pub board_id: BoardId,
    pub title: String,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub tickets: BTreeSet<TicketId>,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub done_columns: Vec<ColumnId>,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub forecast: Option<ScopeForecast>,
}

impl Scope {
    pub fn is_done_column(&self, column: &ColumnId) -> bool {
        self.done_columns.contains(column)
    }
}

/// Lifecycle transition recorded for a ticket.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    Create,
    Delete,
    Move,
    Update,
    ScopeChange,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Create => "CREATE",
            EventKind::Delete => "DELETE",
            EventKind::Move => "MOVE",
            EventKind::Update => "UPDATE",
            EventKind::ScopeChange => "SCOPE_CHANGE",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable row of the ticket event log.
///
/// `ticket_id` is a soft reference: the ticket may since have been deleted.
/// `old_scopes`/`new_scopes` hold the ticket's scope membership right before
/// and right after the transition.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketEvent {
    #[cfg_attr(feature = "serde-full", serde(rename = "ticketeventid"))]
    pub event_id: TicketEventId,
    #[cfg_attr(feature = "serde-full", serde(rename = "ticketid"))]
    pub ticket_id: TicketId,
    pub event_time: DateTime<Utc>,
    #[cfg_attr(feature = "serde-full", serde(rename = "event_type"))]
    pub kind: EventKind,
    #[cfg_attr(feature = "serde-full", serde(rename = "old_columnid"))]
    pub old_column: Option<ColumnId>,
    #[cfg_attr(feature = "serde-full", serde(rename = "new_columnid"))]
    pub new_column: Option<ColumnId>,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub old_size: i64,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub new_size: i64,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub old_scopes: BTreeSet<ScopeId>,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub new_scopes: BTreeSet<ScopeId>,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub title: String,
}

impl TicketEvent {
    /// Skeleton event with empty sizes and scopes; callers fill in the rest.
    pub fn new(ticket_id: TicketId, kind: EventKind, event_time: DateTime<Utc>) -> Self {
        Self {
            event_id: TicketEventId::new(),
            ticket_id,
            event_time,
            kind,
            old_column: None,
            new_column: None,
            old_size: 0,
            new_size: 0,
            old_scopes: BTreeSet::new(),
            new_scopes: BTreeSet::new(),
            title: String::new(),
        }
    }

    pub fn touches_column(&self, column: &ColumnId) -> bool {
        self.old_column.as_ref() == Some(column) || self.new_column.as_ref() == Some(column)
    }

    pub fn touches_scope(&self, scope: &ScopeId) -> bool {
        self.old_scopes.contains(scope) || self.new_scopes.contains(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_parse_and_display_round_trip() {
        let id = ColumnId::new();
        let parsed: ColumnId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);

        let err = "not-a-uuid".parse::<ScopeId>().unwrap_err();
        assert_eq!(err.kind, "scope");
    }

    #[test]
    fn touches_checks_both_sides() {
        let a = ColumnId::new();
        let b = ColumnId::new();
        let scope = ScopeId::new();
        let mut event = TicketEvent::new(
            TicketId::new(),
            EventKind::Move,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        event.old_column = Some(a);
        event.new_column = Some(b);
        event.old_scopes.insert(scope);

        assert!(event.touches_column(&a));
        assert!(event.touches_column(&b));
        assert!(!event.touches_column(&ColumnId::new()));
        assert!(event.touches_scope(&scope));
    }

    #[cfg(feature = "serde-full")]
    #[test]
    fn event_uses_log_field_names() {
        let mut event = TicketEvent::new(
            TicketId::new(),
            EventKind::ScopeChange,
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        );
        event.new_column = Some(ColumnId::new());
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event_type"], "SCOPE_CHANGE");
        assert_eq!(value["event_time"], "2024-01-02T00:00:00Z");
        assert!(value["old_columnid"].is_null());
        assert!(value.get("ticketeventid").is_some());
    }
}
