//! The seam between a connection and the application.
//!
//! A [`Handler`] receives one fully framed request and produces one response.
//! An error returned by the handler is answered with `500 Internal Server Error`.

use std::error::Error;
use std::future::Future;

use bytes::Bytes;
use http::{Request, Response};

#[trait_variant::make(Handler: Send)]
pub trait LocalHandler {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    async fn call(&self, req: Request<Bytes>) -> Result<Response<Bytes>, Self::Error>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F, Fut, Err> Handler for HandlerFn<F>
where
    F: Fn(Request<Bytes>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response<Bytes>, Err>> + Send,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    type Error = Err;

    fn call(&self, req: Request<Bytes>) -> impl Future<Output = Result<Response<Bytes>, Self::Error>> + Send {
        (self.f)(req)
    }
}

/// Lifts an async function into a [`Handler`].
pub fn make_handler<F, Fut, Err>(f: F) -> HandlerFn<F>
where
    F: Fn(Request<Bytes>) -> Fut,
    Fut: Future<Output = Result<Response<Bytes>, Err>>,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    HandlerFn { f }
}
