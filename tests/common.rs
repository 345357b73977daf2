#![allow(dead_code)]

use std::sync::Arc;

use axum::{body::Body, Router};
use birthday_metrics::{app, AppState, MetricsRegistry, SimulatedLatency};
use http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use tower::{BoxError, ServiceExt};

pub async fn echo(req: Request<Body>) -> Result<Response<Body>, BoxError> {
    Ok(Response::new(req.into_body()))
}

pub async fn fail(_req: Request<Body>) -> Result<Response<Body>, BoxError> {
    Err("backend unavailable".into())
}

pub fn test_app(latency: SimulatedLatency) -> (Router, Arc<MetricsRegistry>) {
    let registry = Arc::new(MetricsRegistry::new().unwrap());
    (app(AppState::new(registry.clone(), latency)), registry)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let body = res.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// The value of the first line of `rendered` starting with `series`.
pub fn sample(rendered: &str, series: &str) -> Option<f64> {
    rendered
        .lines()
        .find_map(|line| line.strip_prefix(series)?.strip_prefix(' '))
        .and_then(|value| value.parse().ok())
}
