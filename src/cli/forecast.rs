use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use futuboard_core_types::{ScopeForecast, ScopeId};
use futuboard_event_store::TicketEventStore;
use serde::Serialize;

use super::context::CliContext;
use super::output::emit;

#[derive(Args, Clone)]
pub struct ForecastArgs {
    /// Scope whose current tickets become its forecast
    #[arg(long)]
    pub scope: ScopeId,
}

#[derive(Serialize)]
struct ForecastReport {
    scope: String,
    scope_id: ScopeId,
    forecast: ScopeForecast,
}

/// Freezes the scope's forecast in the loaded workspace and prints it.
pub async fn cmd_forecast(args: ForecastArgs, ctx: &CliContext) -> Result<()> {
    let workspace = ctx.workspace().await?;
    let forecast = workspace
        .store
        .set_scope_forecast(args.scope, Utc::now())
        .await
        .with_context(|| format!("Failed to set forecast for scope {}", args.scope))?;
    let scope = workspace.store.scope(args.scope).await?;

    let report = ForecastReport {
        scope: scope.title,
        scope_id: scope.scope_id,
        forecast,
    };
    emit(ctx.output(), &report, render_forecast)
}

fn render_forecast(report: &ForecastReport) -> String {
    format!(
        "Scope: {}\nForecast size: {}\nTickets: {}\nSet at: {}",
        report.scope,
        report.forecast.size,
        report.forecast.tickets.len(),
        report.forecast.set_at.to_rfc3339()
    )
}
