//! Prometheus scrape endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// GET /metrics - text exposition of all registered instruments.
async fn scrape(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, StatusCode> {
    let body = state.metrics.render().map_err(|e| {
        tracing::error!("Failed to encode metrics: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/metrics", get(scrape))
}
