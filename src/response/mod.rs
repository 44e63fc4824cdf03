use std::convert::Infallible;

use crate::Response;

mod hyper;

pub(crate) use self::hyper::not_found;

pub(crate) const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
#[cfg(feature = "json")]
pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Conversion of a handler's output into the response sent to the client.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl<T, E> IntoResponse for std::result::Result<T, E>
where
    T: IntoResponse,
    E: IntoResponse,
{
    fn into_response(self) -> Response {
        match self {
            Ok(res) => res.into_response(),
            Err(res) => res.into_response(),
        }
    }
}

impl IntoResponse for Infallible {
    fn into_response(self) -> Response {
        match self {}
    }
}
