use clap::Subcommand;

use super::charts::{BurnUpArgs, ChartArgs};
use super::events::BoardArgs;
use super::forecast::ForecastArgs;
use super::serve::ServeArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Print the raw ticket event feed of a board
    Events(BoardArgs),

    /// Per-column size over time
    CumulativeFlow(ChartArgs),

    /// Done vs forecast per scope
    Velocity(BoardArgs),

    /// Done and total size of one scope over time
    BurnUp(BurnUpArgs),

    /// Freeze a scope's current tickets and size as its forecast
    Forecast(ForecastArgs),

    /// Serve the analytics endpoints over HTTP
    Serve(ServeArgs),

    /// Show build information and the effective configuration
    Info,
}
