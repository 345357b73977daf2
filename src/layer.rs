use std::{fmt, sync::Arc, time::Instant};

use axum::extract::MatchedPath;
use http::{Request, Response};
use tower::Layer;

use crate::{
    builder::{EndpointLabel, RouteLatencyLayerBuilder},
    lifecycle::{layer::LifeCycleLayer, service::LifeCycle, Callbacks},
    registry::MetricsRegistry,
    UNMATCHED_ROUTE_LABEL,
};

/// [`Callbacks`] that time a request and report it under its route template.
#[derive(Clone)]
pub struct RouteLatency {
    pub(crate) registry: Arc<MetricsRegistry>,
    pub(crate) endpoint_label: EndpointLabel,
}

/// Struct used for storing information about the current request.
#[derive(Debug, Clone)]
pub struct LatencySample {
    pub route: String,
    pub start: Instant,
}

impl RouteLatency {
    fn resolve_route<B>(&self, request: &Request<B>) -> String {
        let matched = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str);

        match (&self.endpoint_label, matched) {
            (EndpointLabel::Exact, _) => request.uri().path().to_owned(),
            (_, Some(template)) => template.to_owned(),
            (EndpointLabel::MatchedPath, None) => UNMATCHED_ROUTE_LABEL.to_owned(),
            (EndpointLabel::MatchedPathWithFallbackFn(fallback), None) => {
                fallback(request.uri().path())
            }
        }
    }

    fn observe(&self, sample: LatencySample) {
        self.registry
            .observe_latency(&sample.route, sample.start.elapsed());
    }
}

impl Callbacks for RouteLatency {
    type Data = LatencySample;

    fn prepare<B>(&mut self, request: &Request<B>) -> Self::Data {
        let start = Instant::now();
        let route = self.resolve_route(request);

        LatencySample { route, start }
    }

    fn on_response<B>(self, _response: &Response<B>, data: Self::Data) {
        self.observe(data);
    }

    fn on_failure<E: fmt::Display>(self, error: &E, data: Self::Data) {
        tracing::debug!(route = %data.route, %error, "inner service failed");
        self.observe(data);
    }

    fn on_cancel(self, data: Self::Data) {
        tracing::debug!(route = %data.route, "request cancelled before completion");
        self.observe(data);
    }
}

/// The tower middleware layer recording per-route response latency.
///
/// Every request passing through it adds one observation to both
/// [`RESPONSE_LATENCY_SECONDS`](crate::RESPONSE_LATENCY_SECONDS) and
/// [`RESPONSE_LATENCY_HISTOGRAM_SECONDS`](crate::RESPONSE_LATENCY_HISTOGRAM_SECONDS), labeled with
/// `path` set to the matched route template. The observation is made whether the inner service
/// responds, fails, or is dropped early. Responses are passed through untouched.
///
/// Add it with [`axum::Router::layer`] so the matched route is known when it runs.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use axum::{routing::get, Router};
/// use birthday_metrics::{MetricsRegistry, RouteLatencyLayer};
///
/// let registry = Arc::new(MetricsRegistry::new().unwrap());
/// let app: Router = Router::new()
///     .route("/fast", get(|| async {}))
///     .layer(RouteLatencyLayer::new(registry));
/// ```
#[derive(Clone)]
pub struct RouteLatencyLayer {
    pub(crate) inner_layer: LifeCycleLayer<RouteLatency>,
}

impl RouteLatencyLayer {
    /// Create the middleware with the default [`EndpointLabel::MatchedPath`] strategy.
    pub fn new(registry: Arc<MetricsRegistry>) -> Self {
        Self::builder(registry).build()
    }

    /// Start building a customized middleware.
    pub fn builder(registry: Arc<MetricsRegistry>) -> RouteLatencyLayerBuilder {
        RouteLatencyLayerBuilder::new(registry)
    }

    pub(crate) fn from_builder(builder: RouteLatencyLayerBuilder) -> Self {
        let callbacks = RouteLatency {
            registry: builder.registry,
            endpoint_label: builder.endpoint_label,
        };
        Self {
            inner_layer: LifeCycleLayer::new(callbacks),
        }
    }
}

impl<S> Layer<S> for RouteLatencyLayer {
    type Service = LifeCycle<S, RouteLatency>;

    fn layer(&self, inner: S) -> Self::Service {
        self.inner_layer.layer(inner)
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    use super::*;

    fn router(layer: RouteLatencyLayer) -> Router {
        Router::new()
            .route("/foo/{bar}", get(|| async {}))
            .layer(layer)
    }

    async fn call(app: Router, uri: &str) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(req).await.unwrap();
    }

    #[tokio::test]
    async fn matched_path_is_used_as_label() {
        let registry = Arc::new(MetricsRegistry::new().unwrap());
        let app = router(RouteLatencyLayer::new(registry.clone()));

        call(app.clone(), "/foo/1").await;
        call(app, "/foo/2").await;

        let rendered = registry.render();
        assert!(rendered.contains(r#"app_response_latency_seconds_count{path="/foo/{bar}"} 2"#));
        assert!(!rendered.contains(r#"path="/foo/1""#));
    }

    #[tokio::test]
    async fn unmatched_requests_use_the_sentinel_label() {
        let registry = Arc::new(MetricsRegistry::new().unwrap());
        call(router(RouteLatencyLayer::new(registry.clone())), "/nope").await;

        assert!(registry
            .render()
            .contains(r#"app_response_latency_histogram_seconds_count{path=""} 1"#));
    }

    #[tokio::test]
    async fn exact_label_reports_the_literal_path() {
        let registry = Arc::new(MetricsRegistry::new().unwrap());
        let layer = RouteLatencyLayer::builder(registry.clone())
            .with_endpoint_label_type(EndpointLabel::Exact)
            .build();
        call(router(layer), "/foo/1").await;

        assert!(registry
            .render()
            .contains(r#"app_response_latency_seconds_count{path="/foo/1"} 1"#));
    }

    #[tokio::test]
    async fn fallback_fn_only_applies_to_unmatched_requests() {
        let registry = Arc::new(MetricsRegistry::new().unwrap());
        let layer = RouteLatencyLayer::builder(registry.clone())
            .with_endpoint_label_type(EndpointLabel::MatchedPathWithFallbackFn(|path| {
                format!("{path}_unmatched")
            }))
            .build();
        let app = router(layer);
        call(app.clone(), "/foo/1").await;
        call(app, "/nope").await;

        let rendered = registry.render();
        assert!(rendered.contains(r#"app_response_latency_seconds_count{path="/foo/{bar}"} 1"#));
        assert!(rendered.contains(r#"app_response_latency_seconds_count{path="/nope_unmatched"} 1"#));
    }
}
