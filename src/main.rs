use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    futuboard_analytics_cli::cli::app::run().await
}
