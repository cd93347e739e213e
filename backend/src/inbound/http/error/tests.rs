//! Tests for the error envelope formatting and propagation.

use super::*;
use crate::domain::{FieldErrors, Violation};
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn render(error: Error) -> (StatusCode, Option<String>, Value) {
    let response = error.error_response();
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace-id is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("envelope JSON");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::empty_body(), StatusCode::BAD_REQUEST)]
#[case(Error::malformed_body(), StatusCode::BAD_REQUEST)]
#[case(Error::validation(FieldErrors::new()), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(err.status_code(), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("create question: relation \"questions\" does not exist")
        .with_trace_id(expected_trace_id.clone());
    let (status, header, body) = render(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(
        body,
        json!({"status": "Error", "errors": {"error": "internal server error"}})
    );
}

#[rstest]
#[actix_web::test]
async fn unavailable_errors_are_redacted() {
    let (status, _, body) = render(Error::service_unavailable("list questions: refused")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["errors"]["error"], "service unavailable");
}

#[rstest]
#[actix_web::test]
async fn client_errors_expose_message() {
    let (status, header, body) = render(Error::empty_body()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(header.is_none(), "no trace id outside a request scope");
    assert_eq!(
        body,
        json!({"status": "Error", "errors": {"error": "request body is empty"}})
    );
}

#[rstest]
#[actix_web::test]
async fn validation_errors_render_per_field() {
    let error = Error::validation(FieldErrors::single("Text", Violation::Min(3)));
    let (status, _, body) = render(error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": "Error", "errors": {"Text": "Минимум 3 символов"}})
    );
}

#[rstest]
fn actix_errors_become_internal() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream");
    let error = Error::from(actix_error);
    assert_eq!(error.code(), ErrorCode::InternalError);
}
