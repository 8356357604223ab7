use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use flow_analytics::{BurnUp, ChartQuery, CumulativeFlow, Velocity};
use futuboard_core_types::{BoardId, ScopeForecast, ScopeId, TicketEvent};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::error::ApiError;
use super::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/events/:board_id/", get(events_handler))
        .route("/api/events/:board_id", get(events_handler))
        .route(
            "/api/charts/:board_id/cumulativeflow",
            get(cumulative_flow_handler),
        )
        .route("/api/charts/:board_id/velocity", get(velocity_handler))
        .route(
            "/api/charts/:board_id/:scope_id/burnup",
            get(burn_up_handler),
        )
        .route(
            "/api/scopes/:scope_id/set_scope_forecast",
            post(set_scope_forecast_handler),
        )
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn events_handler(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<Vec<TicketEvent>>, ApiError> {
    let board: BoardId = board_id.parse()?;
    Ok(Json(state.analytics.events(board).await?))
}

async fn cumulative_flow_handler(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<CumulativeFlow>, ApiError> {
    let board: BoardId = board_id.parse()?;
    Ok(Json(state.analytics.cumulative_flow(board, &query).await?))
}

async fn velocity_handler(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<Velocity>, ApiError> {
    let board: BoardId = board_id.parse()?;
    Ok(Json(state.analytics.velocity(board).await?))
}

async fn burn_up_handler(
    State(state): State<AppState>,
    Path((board_id, scope_id)): Path<(String, String)>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<BurnUp>, ApiError> {
    let board: BoardId = board_id.parse()?;
    let scope: ScopeId = scope_id.parse()?;
    Ok(Json(state.analytics.burn_up(board, scope, &query).await?))
}

async fn set_scope_forecast_handler(
    State(state): State<AppState>,
    Path(scope_id): Path<String>,
) -> Result<Json<ScopeForecast>, ApiError> {
    let scope: ScopeId = scope_id.parse()?;
    let forecast = state.store.set_scope_forecast(scope, Utc::now()).await?;
    info!(scope = %scope, size = forecast.size, tickets = forecast.tickets.len(), "scope forecast frozen");
    Ok(Json(forecast))
}
