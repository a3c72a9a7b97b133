//! HTTP API surface.

pub mod health;
pub mod info;
pub mod metrics;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(info::router())
        .merge(metrics::router())
        .merge(health::router())
}
