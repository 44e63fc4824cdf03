//! A small request multiplexer for hyper.
//!
//! Routes are registered against a method token and a literal path pattern.
//! A request is served by the route registered under exactly its method and
//! path when there is one, and otherwise by the longest registered pattern
//! that prefixes its path. Routes registered with [`Router::handle_func`]
//! answer every method.

pub mod key;
pub mod request;
pub mod response;
pub mod route;
pub mod router;
pub mod table;

#[cfg(feature = "json")]
pub mod json;

pub use crate::{
    request::RequestExt,
    response::IntoResponse,
    route::Route,
    router::Router,
    table::{InvalidRoute, MatchKind, Registration, RouteTable},
};

pub type Request<B = hyper::Body> = hyper::Request<B>;
pub type Response<B = hyper::Body> = hyper::Response<B>;
