use super::charts::{cmd_burn_up, cmd_cumulative_flow, cmd_velocity};
use super::env::CliArgs;
use super::events::cmd_events;
use super::forecast::cmd_forecast;
use super::info::cmd_info;
use super::serve::cmd_serve;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Events(args) => cmd_events(args, ctx).await,
        Commands::CumulativeFlow(args) => cmd_cumulative_flow(args, ctx).await,
        Commands::Velocity(args) => cmd_velocity(args, ctx).await,
        Commands::BurnUp(args) => cmd_burn_up(args, ctx).await,
        Commands::Forecast(args) => cmd_forecast(args, ctx).await,
        Commands::Serve(args) => cmd_serve(args, ctx).await,
        Commands::Info => cmd_info(ctx).await,
    }
}
