//! Tests for error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn conflict() -> Error {
    Error::conflict("shoppinglist `trip` already exists")
        .with_details(json!({ "field": "title", "code": "duplicate_title" }))
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::conflict("clash"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn serialises_camel_case_and_skips_absent_fields(conflict: Error) {
    let value = serde_json::to_value(&conflict).expect("serialise error");
    assert_eq!(value["code"], "conflict");
    assert_eq!(value["message"], "shoppinglist `trip` already exists");
    assert_eq!(value["details"]["code"], "duplicate_title");
    assert!(value.get("traceId").is_none());
}

#[rstest]
fn trace_id_is_serialised_when_present(conflict: Error) {
    let value = serde_json::to_value(conflict.with_trace_id(TRACE_ID)).expect("serialise");
    assert_eq!(value["traceId"], TRACE_ID);
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::not_found("missing").to_string(), "missing");
}
