use std::{
    fmt,
    task::{Context, Poll},
};

use http::{Request, Response};
use tower::Service;

use super::{future::ResponseFuture, Callbacks};

/// Middleware created by [`LifeCycleLayer`](super::layer::LifeCycleLayer).
#[derive(Clone, Debug)]
pub struct LifeCycle<S, Callbacks> {
    pub(super) inner: S,
    pub(super) callbacks: Callbacks,
}

impl<S, ReqBody, ResBody, CallbacksT> Service<Request<ReqBody>> for LifeCycle<S, CallbacksT>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Error: fmt::Display,
    CallbacksT: Callbacks + Clone,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, CallbacksT>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let callbacks_data = self.callbacks.prepare(&req);

        ResponseFuture {
            inner: self.inner.call(req),
            callbacks: Some(self.callbacks.clone()),
            callbacks_data: Some(callbacks_data),
        }
    }
}
