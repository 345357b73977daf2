//! Middleware that runs callbacks around the lifecycle of a request.
//!
//! [`Callbacks::prepare`] runs before the inner service is called and produces some per-request
//! data. Exactly one of [`Callbacks::on_response`], [`Callbacks::on_failure`] or
//! [`Callbacks::on_cancel`] then receives that data, depending on how the inner future ends.
use std::fmt;

use http::{Request, Response};

mod future;
pub mod layer;
pub mod service;

pub use future::ResponseFuture;

pub trait Callbacks: Sized {
    type Data;

    fn prepare<B>(&mut self, request: &Request<B>) -> Self::Data;

    /// The inner service produced a response.
    #[inline]
    fn on_response<B>(self, _response: &Response<B>, _data: Self::Data) {}

    /// The inner service returned an error.
    #[inline]
    fn on_failure<E: fmt::Display>(self, _error: &E, _data: Self::Data) {}

    /// The response future was dropped before it completed.
    #[inline]
    fn on_cancel(self, _data: Self::Data) {}
}
