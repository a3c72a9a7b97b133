//! Shared application state.

use std::sync::Arc;

use crate::config::{PodIdentity, Settings};
use crate::metrics::Metrics;

/// Shared application state passed to all handlers.
///
/// Settings and identity are resolved once at startup and read-only
/// afterwards; the metrics registry is the only shared mutable state.
pub struct AppState {
    pub settings: Settings,
    pub identity: PodIdentity,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(settings: Settings, identity: PodIdentity, metrics: Arc<Metrics>) -> Self {
        Self {
            settings,
            identity,
            metrics,
        }
    }
}
