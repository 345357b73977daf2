use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use crate::{latency::SimulatedLatency, registry::MetricsRegistry, PROMETHEUS_CONTENT_TYPE};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<MetricsRegistry>,
    pub latency: SimulatedLatency,
}

impl AppState {
    /// Bundle the registry and the simulated latency for the router.
    pub fn new(metrics: Arc<MetricsRegistry>, latency: SimulatedLatency) -> Self {
        Self { metrics, latency }
    }
}

/// `GET /birthday/{name}`
pub async fn birthday(State(state): State<AppState>, Path(name): Path<String>) -> String {
    let _in_flight = state.metrics.track_in_flight();
    state.metrics.count_request();

    let delay = state.latency.sample();
    tokio::time::sleep(delay).await;

    format!("Happy Birthday {name}")
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.metrics.render(),
    )
}
