//! Request body extractor accepting JSON or urlencoded forms.
//!
//! Clients of the shopping list API historically post form data; newer ones
//! send JSON. Both decode into the same request struct, and an empty body
//! decodes to the struct's [`Default`] so missing fields surface as domain
//! validation errors instead of extractor failures.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::Error;

/// Decoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOrJson<T>(pub T);

impl<T> FormOrJson<T> {
    /// Unwrap the decoded body.
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
}

fn body_kind(req: &HttpRequest) -> BodyKind {
    let is_json = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        });
    if is_json {
        BodyKind::Json
    } else {
        BodyKind::Form
    }
}

fn decode<T>(kind: BodyKind, bytes: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let decoded = match kind {
        BodyKind::Json => serde_json::from_slice(bytes).map_err(|err| err.to_string()),
        BodyKind::Form => serde_urlencoded::from_bytes(bytes).map_err(|err| err.to_string()),
    };
    decoded.map_err(|message| {
        debug!(?kind, %message, "request body rejected");
        Error::invalid_request("request body could not be parsed")
    })
}

impl<T> FromRequest for FormOrJson<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut dev::Payload) -> Self::Future {
        let kind = body_kind(req);
        let body = web::Bytes::from_request(req, payload);
        Box::pin(async move {
            let bytes = body.await.map_err(|err| {
                debug!(error = %err, "request body unreadable");
                Error::invalid_request("request body could not be read")
            })?;
            Ok(Self(decode(kind, &bytes)?))
        })
    }
}
