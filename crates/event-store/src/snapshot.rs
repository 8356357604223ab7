use std::path::Path;

use futuboard_core_types::{Board, Column, Scope, TicketEvent};
use serde::{Deserialize, Serialize};

use crate::errors::{EsError, EsErrorKind};

/// One board with everything the analytics engine needs to know about it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: Board,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub scopes: Vec<Scope>,
    #[serde(default)]
    pub events: Vec<TicketEvent>,
}

/// A snapshot file holds either a single board or a list of boards.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotDocument {
    Many(Vec<BoardSnapshot>),
    One(BoardSnapshot),
}

impl SnapshotDocument {
    pub fn from_json(raw: &str) -> Result<Self, EsError> {
        serde_json::from_str(raw).map_err(|err| EsErrorKind::Snapshot(err.to_string()).into())
    }

    pub async fn read_from(path: &Path) -> Result<Self, EsError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|err| {
            EsError::from(EsErrorKind::Snapshot(format!(
                "failed to read {}: {err}",
                path.display()
            )))
        })?;
        Self::from_json(&raw)
    }

    pub fn into_boards(self) -> Vec<BoardSnapshot> {
        match self {
            SnapshotDocument::Many(boards) => boards,
            SnapshotDocument::One(board) => vec![board],
        }
    }
}
