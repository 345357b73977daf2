use std::time::Duration;

use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Counter,
    Gauge,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

use crate::{
    error::Error, REQUESTS_COUNT, REQUESTS_IN_PROGRESS, RESPONSE_LATENCY_HISTOGRAM_SECONDS,
    RESPONSE_LATENCY_SECONDS, SECONDS_DURATION_BUCKETS,
};

/// The set of instruments the service reports, backed by its own Prometheus recorder.
///
/// The recorder is never installed globally. Every instrument is registered against it through
/// [`metrics::with_local_recorder`], so independent registries never observe each other's traffic.
/// Share it between the middleware and the handlers with an `Arc`.
///
/// The latency summary is rendered with quantiles, while the latency histogram is rendered with
/// buckets: `metrics-exporter-prometheus` turns a histogram into a summary unless buckets are
/// configured for it.
pub struct MetricsRegistry {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    requests_count: Counter,
    requests_in_progress: Gauge,
}

impl MetricsRegistry {
    /// Build a registry with [`SECONDS_DURATION_BUCKETS`] for the latency histogram.
    pub fn new() -> Result<Self, Error> {
        Self::with_buckets(SECONDS_DURATION_BUCKETS)
    }

    /// Build a registry with custom buckets for the latency histogram.
    ///
    /// Fails if `buckets` is empty.
    pub fn with_buckets(buckets: &[f64]) -> Result<Self, Error> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(RESPONSE_LATENCY_HISTOGRAM_SECONDS.to_string()),
                buckets,
            )?
            .build_recorder();
        let handle = recorder.handle();

        let (requests_count, requests_in_progress) = metrics::with_local_recorder(&recorder, || {
            describe_counter!(REQUESTS_COUNT, "Total app requests count.");
            describe_gauge!(REQUESTS_IN_PROGRESS, "Requests in progress");
            describe_histogram!(RESPONSE_LATENCY_SECONDS, "Response latency in seconds");
            describe_histogram!(
                RESPONSE_LATENCY_HISTOGRAM_SECONDS,
                "Response latency in seconds"
            );

            (counter!(REQUESTS_COUNT), gauge!(REQUESTS_IN_PROGRESS))
        });

        Ok(Self {
            recorder,
            handle,
            requests_count,
            requests_in_progress,
        })
    }

    /// Count one more request.
    pub fn count_request(&self) {
        self.requests_count.increment(1);
    }

    /// Mark a request as in flight until the returned guard is dropped.
    pub fn track_in_flight(&self) -> InFlightGuard {
        self.requests_in_progress.increment(1.0);
        InFlightGuard {
            gauge: self.requests_in_progress.clone(),
        }
    }

    /// Record one latency observation for `route` into both the summary and the histogram.
    pub fn observe_latency(&self, route: &str, elapsed: Duration) {
        let seconds = elapsed.as_secs_f64();
        metrics::with_local_recorder(&self.recorder, || {
            histogram!(RESPONSE_LATENCY_SECONDS, "path" => route.to_owned()).record(seconds);
            histogram!(RESPONSE_LATENCY_HISTOGRAM_SECONDS, "path" => route.to_owned())
                .record(seconds);
        });
    }

    /// Render every instrument in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Keeps the in-progress gauge raised for as long as it is alive.
#[must_use = "the request stops being counted as in flight as soon as the guard is dropped"]
pub struct InFlightGuard {
    gauge: Gauge,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.decrement(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rendered: &str, series: &str) -> Option<f64> {
        rendered
            .lines()
            .find_map(|line| line.strip_prefix(series)?.strip_prefix(' '))
            .and_then(|value| value.parse().ok())
    }

    #[test]
    fn counter_and_gauge_are_rendered_before_any_traffic() {
        let registry = MetricsRegistry::new().unwrap();
        let rendered = registry.render();

        assert_eq!(sample(&rendered, REQUESTS_COUNT), Some(0.0));
        assert_eq!(sample(&rendered, REQUESTS_IN_PROGRESS), Some(0.0));
        assert!(rendered.contains("# HELP go_app_requests_count Total app requests count."));
    }

    #[test]
    fn count_request_increments_the_counter() {
        let registry = MetricsRegistry::new().unwrap();
        for _ in 0..3 {
            registry.count_request();
        }

        assert_eq!(sample(&registry.render(), REQUESTS_COUNT), Some(3.0));
    }

    #[test]
    fn in_flight_guard_restores_the_gauge() {
        let registry = MetricsRegistry::new().unwrap();

        let first = registry.track_in_flight();
        let second = registry.track_in_flight();
        assert_eq!(sample(&registry.render(), REQUESTS_IN_PROGRESS), Some(2.0));

        drop(first);
        assert_eq!(sample(&registry.render(), REQUESTS_IN_PROGRESS), Some(1.0));

        drop(second);
        assert_eq!(sample(&registry.render(), REQUESTS_IN_PROGRESS), Some(0.0));
    }

    #[test]
    fn latency_is_recorded_into_summary_and_histogram() {
        let registry = MetricsRegistry::new().unwrap();
        registry.observe_latency("/birthday/{name}", Duration::from_millis(20));

        let rendered = registry.render();
        assert!(rendered.contains("# TYPE app_response_latency_seconds summary"));
        assert!(rendered.contains("# TYPE app_response_latency_histogram_seconds histogram"));
        assert_eq!(
            sample(
                &rendered,
                r#"app_response_latency_seconds_count{path="/birthday/{name}"}"#
            ),
            Some(1.0)
        );
        assert_eq!(
            sample(
                &rendered,
                r#"app_response_latency_histogram_seconds_count{path="/birthday/{name}"}"#
            ),
            Some(1.0)
        );
        assert_eq!(
            sample(
                &rendered,
                r#"app_response_latency_histogram_seconds_bucket{path="/birthday/{name}",le="0.025"}"#
            ),
            Some(1.0)
        );
    }

    #[test]
    fn registries_are_isolated() {
        let busy = MetricsRegistry::new().unwrap();
        let idle = MetricsRegistry::new().unwrap();
        busy.count_request();
        busy.observe_latency("/metrics", Duration::ZERO);

        let rendered = idle.render();
        assert_eq!(sample(&rendered, REQUESTS_COUNT), Some(0.0));
        assert!(!rendered.contains("app_response_latency_seconds_count"));
    }

    #[test]
    fn empty_buckets_are_rejected() {
        assert!(matches!(
            MetricsRegistry::with_buckets(&[]),
            Err(Error::Recorder(_))
        ));
    }
}
