use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    error::Error,
    handlers::{self, AppState},
    registry::MetricsRegistry,
    RouteLatencyLayer,
};

/// Build the application router.
///
/// Every route, including `/metrics` and the 404 fallback, passes through the
/// [`RouteLatencyLayer`] bound to the state's registry.
pub fn app(state: AppState) -> Router {
    let latency_layer = RouteLatencyLayer::new(state.metrics.clone());

    Router::new()
        .route("/birthday/{name}", get(handlers::birthday))
        .route("/metrics", get(handlers::metrics))
        .layer(latency_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C is received.
pub async fn serve(config: Config) -> Result<(), Error> {
    let registry = Arc::new(MetricsRegistry::with_buckets(&config.latency_buckets)?);
    let app = app(AppState::new(registry, config.latency));

    let listener = TcpListener::bind(config.addr)
        .await
        .map_err(|source| Error::Bind {
            addr: config.addr,
            source,
        })?;
    tracing::info!(addr = %config.addr, "starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c, shutting down");
        return;
    }
    tracing::info!("shutting down");
}
