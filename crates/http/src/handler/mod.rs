//! Request handlers.
//!
//! A [`Handler`] turns one parsed [`Request`] into one [`Response`]. Plain async functions
//! become handlers through [`make_handler`].

use std::future::Future;

use async_trait::async_trait;

use crate::protocol::{Request, Response};

#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, request: Request) -> Response;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send,
{
    async fn call(&self, request: Request) -> Response {
        (self.f)(request).await
    }
}

/// Wraps an async function as a [`Handler`].
///
/// ```
/// use tcp_http::handler::make_handler;
/// use tcp_http::protocol::{Request, Response};
///
/// async fn hello(_request: Request) -> Response {
///     Response::ok().body("hello")
/// }
///
/// let handler = make_handler(hello);
/// # let _ = handler;
/// ```
pub fn make_handler<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output = Response>,
{
    HandlerFn { f }
}
