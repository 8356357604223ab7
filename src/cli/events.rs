use anyhow::Result;
use clap::Args;
use flow_analytics::Analytics;
use futuboard_core_types::{BoardId, TicketEvent};

use super::context::CliContext;
use super::output::emit;

#[derive(Args, Clone)]
pub struct BoardArgs {
    /// Board identifier (optional when the snapshot holds a single board)
    #[arg(long)]
    pub board: Option<BoardId>,
}

pub async fn cmd_events(args: BoardArgs, ctx: &CliContext) -> Result<()> {
    let workspace = ctx.workspace().await?;
    let board = workspace.resolve_board(args.board)?;
    let feed = workspace.service.events(board).await?;
    emit(ctx.output(), &feed, |events| render_feed(events))
}

fn render_feed(events: &[TicketEvent]) -> String {
    if events.is_empty() {
        return "No events recorded.".to_string();
    }
    let mut out = String::new();
    for event in events {
        let column = |col: &Option<futuboard_core_types::ColumnId>| {
            col.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
        };
        out.push_str(&format!(
            "{}  {:<12} ticket={} {} -> {} size {} -> {}",
            event.event_time.format("%Y-%m-%dT%H:%M:%SZ"),
            event.kind.as_str(),
            event.ticket_id,
            column(&event.old_column),
            column(&event.new_column),
            event.old_size,
            event.new_size,
        ));
        if !event.title.is_empty() {
            out.push_str(&format!("  \"{}\"", event.title));
        }
        out.push('\n');
    }
    out
}
