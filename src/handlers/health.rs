//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::inference::GatewayStatus;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model: GatewayStatus,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model = state.gateway.status();
    Json(HealthResponse {
        status: if model.model_loaded { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model,
    })
}
