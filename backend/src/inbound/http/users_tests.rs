//! Tests for the account handlers.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::test_dependencies;
use crate::server::build_app;

async fn post(app_requests: &[(&str, Value)]) -> Vec<(StatusCode, Value)> {
    let app = actix_test::init_service(build_app(test_dependencies())).await;
    let mut responses = Vec::with_capacity(app_requests.len());
    for (uri, body) in app_requests {
        let req = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        let status = res.status();
        let bytes = actix_test::read_body(res).await;
        let payload = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        responses.push((status, payload));
    }
    responses
}

#[rstest]
#[actix_web::test]
async fn register_returns_public_fields() {
    let responses = post(&[(
        "/user/register/",
        json!({"username": "ada", "password": "s3cret!", "firstname": "Ada"}),
    )])
    .await;
    let (status, body) = &responses[0];
    assert_eq!(*status, StatusCode::CREATED);
    assert_eq!(body["username"], "ada");
    assert_eq!(body["firstname"], "Ada");
    assert!(body.get("lastname").is_none());
    assert!(body.get("password_hash").is_none());
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[rstest]
#[case(json!({"password": "s3cret!"}), StatusCode::BAD_REQUEST, "provide a valid username and password")]
#[case(json!({"username": "ada"}), StatusCode::BAD_REQUEST, "provide a valid username and password")]
#[case(json!({"username": "ada", "password": "123"}), StatusCode::CONFLICT, "password must be at-least 6 characters")]
#[actix_web::test]
async fn register_rejects_invalid_requests(
    #[case] body: Value,
    #[case] expected_status: StatusCode,
    #[case] expected_message: &str,
) {
    let responses = post(&[("/user/register", body)]).await;
    let (status, payload) = &responses[0];
    assert_eq!(*status, expected_status);
    assert_eq!(payload["message"], expected_message);
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_conflicts() {
    let body = json!({"username": "ada", "password": "s3cret!"});
    let responses = post(&[
        ("/user/register/", body.clone()),
        ("/user/register/", body),
    ])
    .await;
    assert_eq!(responses[0].0, StatusCode::CREATED);
    assert_eq!(responses[1].0, StatusCode::CONFLICT);
    assert_eq!(
        responses[1].1["message"],
        "username `ada` is already registered"
    );
}

#[rstest]
#[actix_web::test]
async fn login_issues_bearer_token() {
    let credentials = json!({"username": "ada", "password": "s3cret!"});
    let responses = post(&[
        ("/user/register/", credentials.clone()),
        ("/user/login/", credentials),
    ])
    .await;
    let (status, body) = &responses[1];
    assert_eq!(*status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
    assert_eq!(body["expires_in"], 300);
}

#[rstest]
#[actix_web::test]
async fn login_with_wrong_password_is_unauthorised() {
    let responses = post(&[
        (
            "/user/register/",
            json!({"username": "ada", "password": "s3cret!"}),
        ),
        (
            "/user/login/",
            json!({"username": "ada", "password": "wrong-password"}),
        ),
    ])
    .await;
    assert_eq!(responses[1].0, StatusCode::UNAUTHORIZED);
    assert_eq!(responses[1].1["message"], "invalid username or password");
}

#[rstest]
#[actix_web::test]
async fn form_encoded_login_without_password_is_bad_request() {
    let app = actix_test::init_service(build_app(test_dependencies())).await;
    let req = actix_test::TestRequest::post()
        .uri("/user/login/")
        .insert_header(ContentType::form_url_encoded())
        .set_payload("username=ada")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "missing_credentials");
}
