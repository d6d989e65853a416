//! Authentication extractor used by protected HTTP handlers.
//!
//! Keeps the resource modules focused on request/response mapping by
//! resolving the `Authorization` header to a stored [`User`] here. Both
//! `Basic` credentials and `Bearer` tokens minted at login are accepted.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, LoginCredentials, User};

use super::state::HttpState;

const AUTHENTICATION_REQUIRED: &str = "authentication required";
const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Credentials presented in the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Presented {
    Basic(LoginCredentials),
    Bearer(String),
}

fn split_scheme(value: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = value.trim().split_once(' ')?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some((scheme, rest))
}

fn decode_basic(encoded: &str) -> Result<LoginCredentials, Error> {
    let rejected = || Error::unauthorized(INVALID_CREDENTIALS);
    let bytes = STANDARD.decode(encoded).map_err(|err| {
        debug!(error = %err, "basic credentials are not base64");
        rejected()
    })?;
    let decoded = String::from_utf8(bytes).map_err(|_| rejected())?;
    let (username, password) = decoded.split_once(':').ok_or_else(rejected)?;
    LoginCredentials::try_from_parts(Some(username), Some(password)).map_err(|err| {
        debug!(error = %err, "basic credentials rejected");
        rejected()
    })
}

fn parse_authorization(req: &HttpRequest) -> Result<Presented, Error> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Err(Error::unauthorized(AUTHENTICATION_REQUIRED));
    };
    let value = value
        .to_str()
        .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS))?;
    let (scheme, credentials) =
        split_scheme(value).ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;
    if scheme.eq_ignore_ascii_case("basic") {
        decode_basic(credentials).map(Presented::Basic)
    } else if scheme.eq_ignore_ascii_case("bearer") {
        Ok(Presented::Bearer(credentials.to_owned()))
    } else {
        debug!(%scheme, "unsupported authorization scheme");
        Err(Error::unauthorized(INVALID_CREDENTIALS))
    }
}

/// The user resolved from the request's `Authorization` header.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, get};
/// use shoplist::inbound::http::auth::AuthenticatedUser;
///
/// #[get("/whoami")]
/// async fn whoami(user: AuthenticatedUser) -> HttpResponse {
///     HttpResponse::Ok().body(user.0.username().to_string())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    /// The resolved user.
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let presented = parse_authorization(req);
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let user = match presented? {
                Presented::Basic(credentials) => {
                    state.authenticator.authenticate_basic(&credentials).await?
                }
                Presented::Bearer(token) => state.authenticator.authenticate_bearer(&token).await?,
            };
            Ok(Self(user))
        })
    }
}
