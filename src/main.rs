//! Pod info service - exposes app metadata, pod identity and host resource
//! metrics over HTTP.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use podinfo::api;
use podinfo::config::{PodIdentity, Settings};
use podinfo::error::Error;
use podinfo::metrics::Metrics;
use podinfo::sampler::ResourceSampler;
use podinfo::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Resolve configuration and identity once; both stay immutable afterwards
    let settings = Settings::load()?;
    let identity = PodIdentity::from_env();
    tracing::info!(
        version = %settings.app_version,
        title = %settings.app_title,
        pod = %identity.name,
        "Starting podinfo"
    );

    let metrics = Arc::new(Metrics::new()?);

    // Spawn the resource sampler on its own task
    let sampler = ResourceSampler::new(metrics.clone()).spawn();
    tracing::info!("Resource sampler started");

    let state = Arc::new(AppState::new(settings.clone(), identity, metrics));

    // Build router
    let app = Router::new()
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", settings.host, settings.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sampler.stop().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
