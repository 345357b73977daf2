use tower::Layer;

use super::service::LifeCycle;

/// [`Layer`] for adding callbacks to the lifecycle of request.
///
/// See the [module docs](crate::lifecycle) for more details.
///
/// [`Layer`]: tower::Layer
#[derive(Debug, Clone)]
pub struct LifeCycleLayer<Callbacks> {
    pub(super) callbacks: Callbacks,
}

impl<Callbacks> LifeCycleLayer<Callbacks> {
    /// Create a new `LifeCycleLayer`.
    pub fn new(callbacks: Callbacks) -> Self {
        LifeCycleLayer { callbacks }
    }
}

impl<S, Callbacks> Layer<S> for LifeCycleLayer<Callbacks>
where
    Callbacks: Clone,
{
    type Service = LifeCycle<S, Callbacks>;

    fn layer(&self, inner: S) -> Self::Service {
        LifeCycle {
            inner,
            callbacks: self.callbacks.clone(),
        }
    }
}
