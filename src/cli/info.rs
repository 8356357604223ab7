use anyhow::Result;
use flow_analytics::AnalyticsPolicyView;
use futuboard_event_store::StorePolicyView;
use serde::Serialize;

use super::context::CliContext;
use super::output::emit;

#[derive(Serialize)]
struct InfoReport {
    version: &'static str,
    build_date: &'static str,
    git_commit: &'static str,
    config_path: String,
    data_path: Option<String>,
    serve: String,
    analytics: AnalyticsPolicyView,
    store: StorePolicyView,
}

pub async fn cmd_info(ctx: &CliContext) -> Result<()> {
    let config = ctx.config();
    let report = InfoReport {
        version: env!("CARGO_PKG_VERSION"),
        build_date: env!("BUILD_DATE"),
        git_commit: env!("GIT_HASH"),
        config_path: ctx.config_path().display().to_string(),
        data_path: ctx.data_path().map(|path| path.display().to_string()),
        serve: format!("{}:{}", config.serve.host, config.serve.port),
        analytics: config.analytics.clone(),
        store: config.store.clone(),
    };
    emit(ctx.output(), &report, render_info)
}

fn render_info(report: &InfoReport) -> String {
    let mut out = String::new();
    out.push_str("Futuboard Analytics\n");
    out.push_str("===================\n");
    out.push_str(&format!("Version: {}\n", report.version));
    out.push_str(&format!("Build Date: {}\n", report.build_date));
    out.push_str(&format!("Git Commit: {}\n", report.git_commit));
    out.push('\n');
    out.push_str("Configuration:\n");
    out.push_str(&format!("- Config File: {}\n", report.config_path));
    out.push_str(&format!(
        "- Board Snapshot: {}\n",
        report.data_path.as_deref().unwrap_or("(none)")
    ));
    out.push_str(&format!("- Serve Address: {}\n", report.serve));
    out.push_str(&format!(
        "- Default Time Unit: {}\n",
        report.analytics.default_time_unit
    ));
    out.push_str(&format!(
        "- Default Count Unit: {}\n",
        report.analytics.default_count_unit.as_str()
    ));
    out.push_str(&format!("- Max Buckets: {}\n", report.analytics.max_buckets));
    out.push_str(&format!(
        "- Max Events per Board: {}\n",
        report.store.max_events_per_board
    ));
    out
}
