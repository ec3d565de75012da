//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{
    controller::TimerOption,
    error::TimerError,
    state::AppState,
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /select/:option - Select a preset countdown
pub async fn select_handler(
    State(state): State<Arc<AppState>>,
    Path(option): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let option: TimerOption = option.parse().map_err(|e: TimerError| {
        warn!("Rejected selection: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    let view = state.select(option);
    info!("Select endpoint called - {} selected", option);
    Ok(Json(ApiResponse::selected(
        format!("Selected {}", option),
        view,
    )))
}

/// Handle POST /start - Begin the selected countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.begin() {
        Ok(view) => {
            info!("Start endpoint called - countdown running");
            Ok(Json(ApiResponse::running("Countdown started".to_string(), view)))
        }
        Err(e @ TimerError::InvalidOperation(_)) => {
            warn!("Start rejected: {}", e);
            Err(StatusCode::CONFLICT)
        }
        Err(e) => {
            warn!("Start failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        view: snapshot.view,
        selected_option: snapshot.selected_option,
        run_state: snapshot.run_state,
        remaining_ms: snapshot.remaining_ms,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
