use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures_core::ready;
use http::Response;
use pin_project::{pin_project, pinned_drop};

use super::Callbacks;

/// Response future for [`LifeCycle`](super::service::LifeCycle).
#[pin_project(PinnedDrop)]
pub struct ResponseFuture<F, C: Callbacks> {
    #[pin]
    pub(super) inner: F,
    pub(super) callbacks: Option<C>,
    pub(super) callbacks_data: Option<C::Data>,
}

impl<F, C, ResBody, E> Future for ResponseFuture<F, C>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    C: Callbacks,
    E: fmt::Display,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let result = ready!(this.inner.poll(cx));

        let callbacks = this
            .callbacks
            .take()
            .expect("polled future after completion");
        let callbacks_data = this
            .callbacks_data
            .take()
            .expect("polled future after completion");

        match &result {
            Ok(res) => callbacks.on_response(res, callbacks_data),
            Err(err) => callbacks.on_failure(err, callbacks_data),
        }

        Poll::Ready(result)
    }
}

#[pinned_drop]
impl<F, C: Callbacks> PinnedDrop for ResponseFuture<F, C> {
    fn drop(self: Pin<&mut Self>) {
        let this = self.project();
        if let (Some(callbacks), Some(callbacks_data)) =
            (this.callbacks.take(), this.callbacks_data.take())
        {
            callbacks.on_cancel(callbacks_data);
        }
    }
}
