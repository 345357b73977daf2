//! A birthday greeting service instrumented with Prometheus metrics.
//!
//! `birthday-metrics` relies on [`metrics_exporter_prometheus`] as a backend to interact with Prometheus,
//! but never installs a global recorder: every instrument lives in an explicitly constructed
//! [`MetricsRegistry`] that is handed to the middleware and the handlers.
//!
//! ## Routes
//!
//! - `GET /birthday/{name}` answers `Happy Birthday {name}` after a simulated backend delay
//!   of zero, one or two seconds.
//! - `GET /metrics` renders the registry in the Prometheus text format.
//!
//! ## Metrics
//!
//! - `go_app_requests_count`: the total number of birthday requests (counter)
//! - `app_requests_in_progress`: the number of birthday requests currently being handled (gauge)
//! - `app_response_latency_seconds` (labels: path): response latency of every route (summary)
//! - `app_response_latency_histogram_seconds` (labels: path): response latency of every route (histogram)
//!
//! The `path` label is the matched route template, so `/birthday/alice` and `/birthday/bob` are both
//! reported under `path="/birthday/{name}"`. Requests that match no route are reported under an empty label.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use birthday_metrics::{app, AppState, MetricsRegistry, SimulatedLatency};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = Arc::new(MetricsRegistry::new().unwrap());
//!     let app = app(AppState::new(registry, SimulatedLatency::default()));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8001").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```
//!
//! The [`RouteLatencyLayer`] can also be put in front of any other axum router:
//!
//! ```rust
//! use std::sync::Arc;
//! use axum::{routing::get, Router};
//! use birthday_metrics::{MetricsRegistry, RouteLatencyLayer};
//!
//! let registry = Arc::new(MetricsRegistry::new().unwrap());
//! let metrics = registry.clone();
//! let app: Router = Router::new()
//!     .route("/slow", get(|| async {
//!         tokio::time::sleep(std::time::Duration::from_secs(1)).await;
//!     }))
//!     .route("/metrics", get(move || async move { metrics.render() }))
//!     .layer(RouteLatencyLayer::new(registry));
//! ```

#![allow(clippy::module_name_repetitions, clippy::unreadable_literal)]

/// Identifies the counter used for the total number of birthday requests.
pub const REQUESTS_COUNT: &str = "go_app_requests_count";

/// Identifies the gauge used for the birthday requests in progress.
pub const REQUESTS_IN_PROGRESS: &str = "app_requests_in_progress";

/// Identifies the summary used for response latency.
pub const RESPONSE_LATENCY_SECONDS: &str = "app_response_latency_seconds";

/// Identifies the histogram used for response latency.
pub const RESPONSE_LATENCY_HISTOGRAM_SECONDS: &str = "app_response_latency_histogram_seconds";

mod builder;
mod config;
mod error;
pub mod handlers;
mod latency;
mod layer;
pub mod lifecycle;
mod registry;
mod server;
pub mod utils;

pub use builder::{EndpointLabel, RouteLatencyLayerBuilder};
pub use config::{Config, DEFAULT_PORT};
pub use error::Error;
pub use handlers::AppState;
pub use latency::SimulatedLatency;
pub use layer::{LatencySample, RouteLatency, RouteLatencyLayer};
pub use registry::{InFlightGuard, MetricsRegistry};
pub use server::{app, serve};
pub use utils::{PROMETHEUS_CONTENT_TYPE, SECONDS_DURATION_BUCKETS, UNMATCHED_ROUTE_LABEL};

pub use metrics;
pub use metrics_exporter_prometheus;
