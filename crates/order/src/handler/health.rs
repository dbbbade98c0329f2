use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "order-service" }))
}

pub async fn health_live() -> impl IntoResponse {
    Json(json!({ "status": "alive" }))
}

pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))).into_response(),
        Err(err) => {
            error!("readiness_check_failed: {err:?}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "not ready", "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
