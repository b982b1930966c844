//! Tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_the_matching_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[test]
fn serialises_camel_case_and_skips_empty_fields() {
    let value = serde_json::to_value(Error::conflict("Username already exists"))
        .expect("serialise error");
    assert_eq!(
        value,
        json!({ "code": "conflict", "message": "Username already exists" })
    );
}

#[test]
fn serialises_trace_id_and_details() {
    let error = Error::invalid_request("bad")
        .with_trace_id("abc")
        .with_details(json!({ "field": "hours" }));
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(value.get("traceId"), Some(&json!("abc")));
    assert_eq!(value.pointer("/details/field"), Some(&json!("hours")));
}

#[test]
fn accepts_snake_case_trace_id_alias() {
    let error: Error = serde_json::from_value(json!({
        "code": "forbidden",
        "message": "Forbidden",
        "trace_id": "abc",
    }))
    .expect("deserialise error");
    assert_eq!(error.trace_id(), Some("abc"));
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id = TraceId::generate();
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
}

#[test]
fn display_uses_message() {
    assert_eq!(Error::forbidden("Forbidden").to_string(), "Forbidden");
}
