use std::{net::SocketAddr, ops::Deref};

use crate::table::{MatchKind, RouteEntry};

/// Peer address of the connection a request arrived on.
#[derive(Debug, Clone, Copy)]
pub struct RemoteAddrExt(pub SocketAddr);

impl Deref for RemoteAddrExt {
    type Target = SocketAddr;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<RemoteAddrExt> for SocketAddr {
    fn from(ext: RemoteAddrExt) -> Self {
        ext.0
    }
}

/// The registered route a request was dispatched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    method: Box<str>,
    route: Box<str>,
    kind: MatchKind,
}

impl MatchedRoute {
    pub(crate) fn new<H>(entry: &RouteEntry<H>, kind: MatchKind) -> Self {
        Self {
            method: entry.method().into(),
            route: entry.route().into(),
            kind,
        }
    }

    /// Method token of the route, `*` for catch-all routes.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }
}
