//! Futuboard analytics binary: configuration, CLI subcommands and the HTTP
//! surface over the `flow-analytics` engine.

pub mod cli;
pub mod config;
pub mod server;

pub use config::{Config, ServeConfig};
