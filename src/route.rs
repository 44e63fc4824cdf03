use std::{fmt, pin::Pin, sync::Arc};

use futures_util::{Future, FutureExt};

use crate::{response::IntoResponse, Request, Response};

pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;
pub(crate) type Handler = dyn Fn(Request) -> HandlerFuture + Send + Sync + 'static;

/// A type-erased request handler.
///
/// Cloning a route only clones a reference to the underlying handler, which is
/// what the route table hands out on every match.
#[derive(Clone)]
pub struct Route(Arc<Handler>);

impl Route {
    pub fn new<H, Fut, Out>(handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Out> + Send + 'static,
        Out: IntoResponse + 'static,
    {
        Self(Arc::new(move |req: Request| -> HandlerFuture {
            Box::pin(handler(req).map(IntoResponse::into_response))
        }))
    }

    pub(crate) fn call(&self, req: Request) -> HandlerFuture {
        (self.0)(req)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Route").field(&Arc::as_ptr(&self.0)).finish()
    }
}
