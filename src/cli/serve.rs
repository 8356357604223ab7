use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use flow_analytics::Analytics;
use futuboard_event_store::TicketEventStore;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::server::{build_router, AppState};

use super::context::CliContext;

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Interface to bind (defaults to serve.host from the config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (defaults to serve.port from the config)
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn cmd_serve(args: ServeArgs, ctx: &CliContext) -> Result<()> {
    let workspace = ctx.workspace().await?;
    let analytics: Arc<dyn Analytics> = workspace.service.clone();
    let store: Arc<dyn TicketEventStore> = workspace.store.clone();
    let router = build_router(AppState::new(analytics, store));

    let host = args.host.unwrap_or_else(|| ctx.config().serve.host.clone());
    let port = args.port.unwrap_or(ctx.config().serve.port);
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local = listener.local_addr().context("Failed to read bound address")?;

    info!(%local, boards = workspace.boards.len(), "Analytics server listening");
    println!("Serving Futuboard analytics on http://{local}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Analytics server terminated unexpectedly")?;
    info!("Analytics server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(?err, "failed to listen for ctrl-c; serving until killed");
        std::future::pending::<()>().await;
    }
}
