use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use flow_analytics::adapters::TracingEventsPort;
use flow_analytics::{AnalyticsPolicyHandle, AnalyticsService};
use futuboard_core_types::BoardId;
use futuboard_event_store::{InMemoryEventStore, SnapshotDocument};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::cli::output::OutputFormat;
use crate::config::Config;

/// Event log and analytics service built from the configured snapshot.
pub struct Workspace {
    pub store: Arc<InMemoryEventStore>,
    pub service: Arc<AnalyticsService>,
    pub policy: AnalyticsPolicyHandle,
    pub boards: Vec<BoardId>,
}

impl Workspace {
    pub async fn load(config: &Config, data_path: Option<&Path>) -> Result<Self> {
        let store = InMemoryEventStore::new(config.store.clone());
        let mut boards = Vec::new();

        match data_path {
            Some(path) => {
                let document = SnapshotDocument::read_from(path)
                    .await
                    .with_context(|| format!("Failed to load board snapshot {}", path.display()))?;
                for snapshot in document.into_boards() {
                    let board_id = snapshot.board.board_id;
                    let events = store
                        .load_snapshot(snapshot)
                        .await
                        .with_context(|| format!("Failed to import board {board_id}"))?;
                    info!(board = %board_id, events, "board ready");
                    boards.push(board_id);
                }
            }
            None => warn!("No board snapshot configured; the event log starts empty"),
        }

        let policy = AnalyticsPolicyHandle::new_with(config.analytics.clone());
        let service = AnalyticsService::with_store(store.clone(), policy.clone())
            .with_events(Arc::new(TracingEventsPort));

        Ok(Self {
            store,
            service: Arc::new(service),
            policy,
            boards,
        })
    }

    /// The requested board, or the only loaded one when none is named.
    pub fn resolve_board(&self, requested: Option<BoardId>) -> Result<BoardId> {
        if let Some(board) = requested {
            return Ok(board);
        }
        match self.boards.as_slice() {
            [only] => Ok(*only),
            [] => bail!("No boards loaded; pass --data <snapshot.json> or set data_path"),
            many => bail!(
                "Snapshot holds {} boards; pick one with --board ({})",
                many.len(),
                many.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

pub struct CliContext {
    config: Arc<Config>,
    config_path: PathBuf,
    data_path: Option<PathBuf>,
    output: OutputFormat,
    workspace: OnceCell<Arc<Workspace>>,
}

impl CliContext {
    pub fn new(
        config: Config,
        config_path: PathBuf,
        data_path: Option<PathBuf>,
        output: OutputFormat,
    ) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
            data_path,
            output,
            workspace: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }

    pub fn output(&self) -> &OutputFormat {
        &self.output
    }

    pub async fn workspace(&self) -> Result<Arc<Workspace>> {
        self.workspace
            .get_or_try_init(|| async {
                Workspace::load(self.config(), self.data_path())
                    .await
                    .map(Arc::new)
            })
            .await
            .map(Arc::clone)
    }
}
