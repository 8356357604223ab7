use anyhow::Result;
use clap::Args;
use flow_analytics::{Analytics, BurnUp, ChartQuery, CumulativeFlow, Velocity};
use futuboard_core_types::{BoardId, ScopeId};

use super::context::CliContext;
use super::events::BoardArgs;
use super::output::emit;

#[derive(Args, Clone)]
pub struct ChartArgs {
    /// Board identifier (optional when the snapshot holds a single board)
    #[arg(long)]
    pub board: Option<BoardId>,

    /// Bucket size: minute, hour, day, week, month or year
    #[arg(long)]
    pub time_unit: Option<String>,

    /// First bucket (ISO-8601 date or datetime)
    #[arg(long)]
    pub start_time: Option<String>,

    /// Last bucket (ISO-8601 date or datetime); defaults to now
    #[arg(long)]
    pub end_time: Option<String>,

    /// Weigh tickets by story points (size) or count them (count)
    #[arg(long)]
    pub count_unit: Option<String>,
}

impl ChartArgs {
    fn query(&self) -> ChartQuery {
        ChartQuery {
            time_unit: self.time_unit.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            count_unit: self.count_unit.clone(),
        }
    }
}

#[derive(Args, Clone)]
pub struct BurnUpArgs {
    /// Scope to chart
    #[arg(long)]
    pub scope: ScopeId,

    #[command(flatten)]
    pub chart: ChartArgs,
}

pub async fn cmd_cumulative_flow(args: ChartArgs, ctx: &CliContext) -> Result<()> {
    let workspace = ctx.workspace().await?;
    let board = workspace.resolve_board(args.board)?;
    let flow = workspace
        .service
        .cumulative_flow(board, &args.query())
        .await?;
    emit(ctx.output(), &flow, render_cumulative_flow)
}

pub async fn cmd_velocity(args: BoardArgs, ctx: &CliContext) -> Result<()> {
    let workspace = ctx.workspace().await?;
    let board = workspace.resolve_board(args.board)?;
    let velocity = workspace.service.velocity(board).await?;
    emit(ctx.output(), &velocity, render_velocity)
}

pub async fn cmd_burn_up(args: BurnUpArgs, ctx: &CliContext) -> Result<()> {
    let workspace = ctx.workspace().await?;
    let board = workspace.resolve_board(args.chart.board)?;
    let burn_up = workspace
        .service
        .burn_up(board, args.scope, &args.chart.query())
        .await?;
    emit(ctx.output(), &burn_up, render_burn_up)
}

fn render_cumulative_flow(flow: &CumulativeFlow) -> String {
    if flow.data.is_empty() {
        return "No events recorded for this board.".to_string();
    }
    let mut header = vec!["bucket".to_string()];
    header.extend(flow.columns.iter().cloned());
    let rows = flow.data.iter().map(|point| {
        let mut row = vec![point.name.clone()];
        row.extend(point.values.iter().map(|(_, size)| size.to_string()));
        row
    });
    render_table(header, rows)
}

fn render_velocity(velocity: &Velocity) -> String {
    if velocity.data.is_empty() {
        return "Board has no scopes.".to_string();
    }
    let header = vec!["scope".to_string(), "done".to_string(), "forecast".to_string()];
    let rows = velocity.data.iter().map(|row| {
        vec![
            row.name.clone(),
            row.done.to_string(),
            row.forecast.to_string(),
        ]
    });
    render_table(header, rows)
}

fn render_burn_up(burn_up: &BurnUp) -> String {
    let title = format!("Scope: {} ({})", burn_up.scope, burn_up.count_unit.as_str());
    if burn_up.data.is_empty() {
        return format!("{title}\nNo events recorded for this scope.");
    }
    let header = vec![
        "bucket".to_string(),
        "done".to_string(),
        "total".to_string(),
        "forecast".to_string(),
    ];
    let rows = burn_up.data.iter().map(|point| {
        vec![
            point.name.clone(),
            point.done.to_string(),
            point.total.to_string(),
            point
                .forecast
                .map(|f| f.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    });
    format!("{title}\n{}", render_table(header, rows))
}

fn render_table<I>(header: Vec<String>, rows: I) -> String
where
    I: Iterator<Item = Vec<String>>,
{
    let rows: Vec<Vec<String>> = rows.collect();
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(&header);
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_columns_to_widest_cell() {
        let table = render_table(
            vec!["bucket".into(), "Todo".into()],
            vec![vec!["2024-01-01T00:00:00".into(), "5".into()]].into_iter(),
        );
        assert_eq!(
            table,
            "bucket               Todo\n2024-01-01T00:00:00  5\n"
        );
    }
}
