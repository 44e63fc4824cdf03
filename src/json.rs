//! Json request bodies and responses

use hyper::body::{Bytes, HttpBody};
use hyper::{
    header::{self, HeaderValue},
    Body, StatusCode,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::response::{IntoResponse, APPLICATION_JSON};
use crate::{Request, Response};

/// A value read from, or written as, a json body.
///
/// ```
/// # use vanilla_mux::{json::Json, Request, Router};
/// # use std::collections::HashMap;
/// let router = Router::new();
/// router.post("/echo", |req: Request| async move {
///     // Echo back the posted object, or reply 400 when it is not json
///     Json::<HashMap<String, String>>::from_request(req).await
/// });
/// ```
///
/// [`Json::from_bytes`] borrows from a buffer the handler keeps alive, for
/// zero-copy deserialization.
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

pub use serde_json::Error as JsonError;

/// Failure to read a json request body.
#[derive(Debug, Error)]
pub enum Error<E> {
    #[error("body error: {0}")]
    Body(E),

    #[error("json error: {0}")]
    Json(#[from] JsonError),
}

/// Malformed json is the client's fault, an unreadable body is not.
impl<E> IntoResponse for Error<E>
where
    E: std::fmt::Display,
{
    fn into_response(self) -> Response {
        let status = match self {
            Error::Body(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Json(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

impl<T: DeserializeOwned> Json<T> {
    /// Reads the whole body of `req` and decodes it.
    pub async fn from_request<B>(req: Request<B>) -> Result<Self, Error<B::Error>>
    where
        B: HttpBody,
    {
        let bytes = hyper::body::to_bytes(req.into_body())
            .await
            .map_err(Error::Body)?;
        Ok(Json(serde_json::from_slice(&bytes)?))
    }
}

impl<'a, T: Deserialize<'a>> Json<T> {
    pub fn from_bytes(bytes: &'a Bytes) -> Result<Self, JsonError> {
        serde_json::from_slice(bytes).map(Json)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(content) => {
                let mut res = Response::new(Body::from(content));
                res.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(APPLICATION_JSON),
                );
                res
            }
            Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
        }
    }
}
