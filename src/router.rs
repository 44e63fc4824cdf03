use std::{
    convert::Infallible,
    future::{Future, Ready},
    net::SocketAddr,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use futures_util::ready;
use hyper::{server::conn::AddrStream, Body};
use pin_project::pin_project;
use tower_service::Service;

use crate::{
    key::{DELETE, GET, OPTIONS, POST, PUT, WILDCARD},
    request::ext::{MatchedRoute, RemoteAddrExt},
    response::{self, IntoResponse},
    route::{HandlerFuture, Route},
    table::{InvalidRoute, Registration, RouteTable},
    Request, Response,
};

/// Request multiplexer dispatching on exact `method:path` keys first and on
/// the longest registered prefix otherwise.
///
/// Clones share the same table, so routes registered through one clone are
/// visible to every connection served by the others, including routes added
/// while the server is running.
///
/// ```
/// # use vanilla_mux::{Router, Request};
/// let router = Router::new();
/// router.get("/hello", |_req: Request| async { "Hello, World!" });
/// router.handle_func("/", |_req: Request| async { "Goodbye" });
/// ```
#[derive(Clone, Default)]
pub struct Router {
    table: Arc<RouteTable<Route>>,
}

macro_rules! impl_method_helpers {
    ($($(#[$attr:meta])* $name:ident -> $method:ident)*) => {
        $(
            $(#[$attr])*
            #[track_caller]
            pub fn $name<H, Fut, Out>(&self, pattern: &str, handler: H) -> &Self
            where
                H: Fn(Request) -> Fut + Send + Sync + 'static,
                Fut: Future<Output = Out> + Send + 'static,
                Out: IntoResponse + 'static,
            {
                self.must_handle($method, pattern, handler)
            }
        )*
    };
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    impl_method_helpers! {
        get -> GET
        put -> PUT
        post -> POST
        delete -> DELETE
        options -> OPTIONS
        /// Registers `handler` for every method on `pattern`.
        handle_func -> WILDCARD
    }

    /// Registers `handler` under an arbitrary method token.
    pub fn handle<H, Fut, Out>(
        &self,
        method: &str,
        pattern: &str,
        handler: H,
    ) -> Result<Registration, InvalidRoute>
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Out> + Send + 'static,
        Out: IntoResponse + 'static,
    {
        self.table.register(method, pattern, Route::new(handler))
    }

    // An invalid registration is a bug in the embedding application
    #[track_caller]
    fn must_handle<H, Fut, Out>(&self, method: &str, pattern: &str, handler: H) -> &Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Out> + Send + 'static,
        Out: IntoResponse + 'static,
    {
        if let Err(err) = self.handle(method, pattern, handler) {
            panic!("invalid route `{}` for method `{}`: {}", pattern, method, err);
        }
        self
    }

    /// The underlying table, for introspection.
    pub fn table(&self) -> &RouteTable<Route> {
        &self.table
    }

    /// Dispatches `req` to its route, or answers `404 Not Found` when none
    /// matches.
    pub fn call_route(&self, mut req: Request) -> RequestFuture<Response, HandlerFuture> {
        let found = self
            .table
            .lookup(req.method().as_str(), req.uri().path());

        match found {
            Some(found) => {
                req.extensions_mut()
                    .insert(MatchedRoute::new(&found.entry, found.kind));
                RequestFuture::Route(found.entry.handler().call(req))
            }
            None => {
                tracing::debug!(method = %req.method(), path = req.uri().path(), "no route");
                RequestFuture::Response(Some(response::not_found()))
            }
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").field("routes", &self.table).finish()
    }
}

impl Service<&AddrStream> for Router {
    type Response = RequestService;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, conn: &AddrStream) -> Self::Future {
        std::future::ready(Ok(RequestService {
            remote_addr: Some(conn.remote_addr()),
            router: self.clone(),
        }))
    }
}

/// Per-connection service handed to hyper.
#[derive(Debug, Clone)]
pub struct RequestService {
    remote_addr: Option<SocketAddr>,
    router: Router,
}

impl From<Router> for RequestService {
    fn from(router: Router) -> Self {
        Self {
            remote_addr: None,
            router,
        }
    }
}

impl Service<Request<Body>> for RequestService {
    type Response = Response;
    type Error = Infallible;
    type Future = RequestFuture<Self::Response, HandlerFuture>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // It's not possible to know if the route in question is ready, because the request has not
        // been received yet. Meaning that backpressure across the router boundry is not possible.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        if let Some(addr) = self.remote_addr {
            req.extensions_mut().insert(RemoteAddrExt(addr));
        }
        self.router.call_route(req)
    }
}

#[pin_project(project = RequestFutureProj)]
pub enum RequestFuture<Res, Fut> {
    Route(#[pin] Fut),
    Response(Option<Res>),
}

impl<Res, Fut> Future for RequestFuture<Res, Fut>
where
    Fut: Future<Output = Res>,
{
    type Output = Result<Res, Infallible>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            RequestFutureProj::Route(fut) => Poll::Ready(Ok(ready!(fut.poll(cx)))),
            RequestFutureProj::Response(res) => match res.take() {
                Some(res) => Poll::Ready(Ok(res)),
                None => panic!("future polled after completion"),
            },
        }
    }
}
