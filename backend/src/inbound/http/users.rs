//! Account API handlers.
//!
//! ```text
//! POST /user/register/ {"username":"ada","password":"s3cret!"}
//! POST /user/login/ {"username":"ada","password":"s3cret!"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::IssuedToken;
use crate::domain::{ApiResult, Error, LoginCredentials, Registration};
use crate::inbound::http::payload::FormOrJson;
use crate::inbound::http::schemas::UserResponse;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /user/register/`.
///
/// Every field is optional on the wire so absent credentials are reported
/// with the domain's `missing_credentials` rejection.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[schema(example = "s3cret!")]
    pub password: Option<String>,
    #[schema(example = "Ada")]
    pub firstname: Option<String>,
    #[schema(example = "Lovelace")]
    pub lastname: Option<String>,
}

/// Login body for `POST /user/login/`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[schema(example = "s3cret!")]
    pub password: Option<String>,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/user/register/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Missing credentials", body = Error),
        (status = 409, description = "Weak password or username taken", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/user/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: FormOrJson<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let registration = Registration::try_from_parts(
        body.username.as_deref(),
        body.password.as_deref(),
        body.firstname.as_deref(),
        body.lastname.as_deref(),
    )?;
    let user = state.accounts.register(&registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/user/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = IssuedToken),
        (status = 400, description = "Missing credentials", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/user/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: FormOrJson<LoginRequest>,
) -> ApiResult<web::Json<IssuedToken>> {
    let body = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(body.username.as_deref(), body.password.as_deref())?;
    let token = state.accounts.login(&credentials).await?;
    Ok(web::Json(token))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
