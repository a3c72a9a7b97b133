//! Health check endpoint.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health - liveness probe.
async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
