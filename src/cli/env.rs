use clap::Parser;
use std::path::PathBuf;

use super::commands::Commands;

/// Futuboard analytics - cumulative flow, velocity and burn-up from ticket event logs
#[derive(Parser)]
#[command(name = "futuboard-analytics", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(short, long, default_value = "human", global = true)]
    pub output: crate::cli::output::OutputFormat,

    /// Board snapshot to load (JSON); overrides FUTUBOARD_DATA and the config file
    #[arg(long, value_name = "FILE", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
