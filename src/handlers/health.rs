use axum::{extract::State, Json};
use chrono::Utc;
use crate::{models::{HealthResponse, ReadyResponse}, AppState};
use std::sync::Arc;
use tracing::debug;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.config.service_name.clone(),
    })
}

/// Readiness check endpoint
pub async fn ready_check(State(state): State<Arc<AppState>>) -> Json<ReadyResponse> {
    debug!("Readiness check requested");
    Json(ReadyResponse {
        status: "ok".to_string(),
        service: state.config.service_name.clone(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
    })
}
