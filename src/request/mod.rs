pub(crate) mod ext;

use std::net::SocketAddr;

use crate::Request;

pub use self::ext::{MatchedRoute, RemoteAddrExt};

pub trait RequestExt {
    /// Address of the peer, when the request came through a served connection.
    fn remote_address(&self) -> Option<&SocketAddr>;

    /// Route the router picked for this request.
    fn matched_route(&self) -> Option<&MatchedRoute>;
}

impl<B> RequestExt for Request<B> {
    fn remote_address(&self) -> Option<&SocketAddr> {
        self.extensions().get::<RemoteAddrExt>().map(|ext| &**ext)
    }

    fn matched_route(&self) -> Option<&MatchedRoute> {
        self.extensions().get::<MatchedRoute>()
    }
}
