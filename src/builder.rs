use std::sync::Arc;

use crate::{registry::MetricsRegistry, RouteLatencyLayer};

#[derive(Default, Clone)]
/// Determines how endpoints are reported in the `path` label.
pub enum EndpointLabel {
    /// The reported label is always the fully qualified uri path that has been requested.
    ///
    /// Every distinct parameter value becomes its own label, so this is only suitable for debugging.
    Exact,
    /// The reported label is the route template extracted from [`axum::extract::MatchedPath`], e.g.
    /// `/birthday/{name}`. Requests that matched no route are reported under an empty label. This
    /// is the default option.
    #[default]
    MatchedPath,
    /// Same as [`EndpointLabel::MatchedPath`], but requests that matched no route are given to a
    /// user-defined fallback function that produces the reported label from the requested path.
    MatchedPathWithFallbackFn(for<'f> fn(&'f str) -> String),
}

/// A builder for [`RouteLatencyLayer`] that enables further customizations.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use birthday_metrics::{EndpointLabel, MetricsRegistry, RouteLatencyLayer};
///
/// let registry = Arc::new(MetricsRegistry::new().unwrap());
/// let layer = RouteLatencyLayer::builder(registry)
///     .with_endpoint_label_type(EndpointLabel::MatchedPathWithFallbackFn(|_| "unknown".into()))
///     .build();
/// ```
#[derive(Clone)]
pub struct RouteLatencyLayerBuilder {
    pub(crate) registry: Arc<MetricsRegistry>,
    pub(crate) endpoint_label: EndpointLabel,
}

impl RouteLatencyLayerBuilder {
    /// Initialize the builder.
    pub fn new(registry: Arc<MetricsRegistry>) -> Self {
        Self {
            registry,
            endpoint_label: EndpointLabel::default(),
        }
    }

    /// Determine how endpoints are reported. For more information, see [`EndpointLabel`].
    pub fn with_endpoint_label_type(mut self, endpoint_label: EndpointLabel) -> Self {
        self.endpoint_label = endpoint_label;
        self
    }

    /// Finalize the builder.
    pub fn build(self) -> RouteLatencyLayer {
        RouteLatencyLayer::from_builder(self)
    }
}
