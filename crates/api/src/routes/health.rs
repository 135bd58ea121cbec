use axum::{extract::State, routing::get, Json, Router};
use newsdesk_core::envelope::ApiEnvelope;
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/ping", get(ping))
}

/// Full health check — reports collection size and listener count.
async fn health_check(State(state): State<AppState>) -> Json<ApiEnvelope<Value>> {
    let items = state.store().read().await.len();
    Json(ApiEnvelope::ok(json!({
        "status": "ok",
        "items": items,
        "subscribers": state.event_bus().subscriber_count(),
    })))
}

/// Lightweight ping — no state access.
async fn ping() -> Json<ApiEnvelope<Value>> {
    Json(ApiEnvelope::ok(json!({ "status": "ok" })))
}
