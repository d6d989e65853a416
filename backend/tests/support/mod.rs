//! Shared helpers for the HTTP integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so the
//! app wiring and request plumbing they share lives here. Every app is backed
//! by a fresh in-memory store.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{self, ContentType, HeaderMap};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::web;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Duration;
use serde_json::{Value, json};
use shoplist::inbound::http::health::HealthState;
use shoplist::outbound::security::{Argon2PasswordHasher, JwtTokenService};
use shoplist::server::{AppDependencies, build_http_state};

pub const PASSWORD: &str = "s3cret!";

/// Fresh dependencies over the in-memory store.
pub fn dependencies() -> AppDependencies {
    let hasher = Argon2PasswordHasher::low_cost().expect("low-cost argon2 parameters");
    let tokens = JwtTokenService::new(b"integration-secret", Duration::minutes(10));
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(build_http_state(None, hasher, tokens)),
    }
}

/// Captured response with a decoded JSON body (`Value::Null` when empty).
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Reply {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

pub async fn send<S, B>(app: &S, request: TestRequest) -> Reply
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, request.to_request()).await;
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = test::read_body(res).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply {
        status,
        headers,
        body,
    }
}

pub fn basic(username: &str, password: &str) -> (header::HeaderName, String) {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    (header::AUTHORIZATION, format!("Basic {encoded}"))
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

pub fn form(request: TestRequest, body: &str) -> TestRequest {
    request
        .insert_header(ContentType::form_url_encoded())
        .set_payload(body.to_owned())
}

pub async fn register<S, B>(app: &S, username: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(
        app,
        TestRequest::post()
            .uri("/user/register/")
            .set_json(json!({ "username": username, "password": PASSWORD })),
    )
    .await
}

/// Register `username` and exchange the credentials for a bearer token.
pub async fn token_for<S, B>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let registered = register(app, username).await;
    assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);
    let login = send(
        app,
        TestRequest::post()
            .uri("/user/login/")
            .set_json(json!({ "username": username, "password": PASSWORD })),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);
    login.body["token"]
        .as_str()
        .expect("token in login response")
        .to_owned()
}

/// Create a list owned by the bearer of `token` and return its id.
pub async fn create_list<S, B>(app: &S, token: &str, title: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let reply = send(
        app,
        TestRequest::post()
            .uri("/shoppinglist/")
            .insert_header(bearer(token))
            .set_json(json!({ "title": title })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    reply.body["id"].as_i64().expect("list id")
}
