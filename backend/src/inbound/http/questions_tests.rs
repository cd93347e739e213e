//! Handler coverage for the question endpoints.
//!
//! Happy paths run against the in-memory repository through the real
//! service; failure classification uses mocked driving ports.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode, header};
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{MockQuestionsCommand, MockQuestionsQuery};
use crate::domain::{Error, QaService};
use crate::inbound::http::routes::configure;
use crate::inbound::http::state::HttpState;
use crate::test_support::{InMemoryQaRepository, fixed_clock, fixture_timestamp};

fn in_memory_state() -> web::Data<HttpState> {
    let repository = Arc::new(InMemoryQaRepository::new());
    let service = Arc::new(QaService::new(
        repository.clone(),
        repository,
        fixed_clock(),
    ));
    web::Data::new(HttpState::new(service.clone(), service))
}

fn mocked_state(command: MockQuestionsCommand, query: MockQuestionsQuery) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(command), Arc::new(query)))
}

async fn test_app(
    state: web::Data<HttpState>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(App::new().app_data(state).configure(configure)).await
}

fn post_json(uri: &str, body: &'static str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri(uri)
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(body)
        .to_request()
}

#[actix_web::test]
async fn create_question_returns_the_stored_question() {
    let app = test_app(in_memory_state()).await;

    let response =
        actix_test::call_service(&app, post_json("/questions", r#"{"text":"Why is the sky blue?"}"#))
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["id"], 1);
    assert_eq!(body["text"], "Why is the sky blue?");
    assert_eq!(body["created_at"], json!(fixture_timestamp()));
    assert!(body.get("errors").is_none());
}

#[rstest]
#[case(r#"{"text":"ab"}"#, "Минимум 3 символов")]
#[case(r#"{"text":""}"#, "Это поле обязательно")]
#[case(r#"{}"#, "Это поле обязательно")]
#[case(r#"{"text":"","extra":true}"#, "Это поле обязательно")]
#[actix_web::test]
async fn invalid_question_text_is_reported_per_field(
    #[case] payload: &'static str,
    #[case] message: &str,
) {
    let app = test_app(in_memory_state()).await;

    let response = actix_test::call_service(&app, post_json("/questions", payload)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"status": "Error", "errors": {"Text": message}}));
}

#[actix_web::test]
async fn over_long_question_text_reports_maximum() {
    let app = test_app(in_memory_state()).await;
    let text = "x".repeat(501);
    let request = actix_test::TestRequest::post()
        .uri("/questions")
        .set_json(json!({ "text": text }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["errors"]["Text"], "Максимум 500 символов");
}

#[rstest]
#[case("", "request body is empty")]
#[case("   ", "request body is empty")]
#[case("{not json", "failed to decode request body")]
#[case(r#"{"text":42}"#, "failed to decode request body")]
#[case("[]", "failed to decode request body")]
#[case(r#"["Why is the sky blue?"]"#, "failed to decode request body")]
#[case(r#""Why is the sky blue?""#, "failed to decode request body")]
#[actix_web::test]
async fn undecodable_bodies_are_rejected(#[case] payload: &'static str, #[case] message: &str) {
    let app = test_app(in_memory_state()).await;

    let response = actix_test::call_service(&app, post_json("/questions", payload)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"status": "Error", "errors": {"error": message}}));
}

#[actix_web::test]
async fn array_bodies_create_nothing() {
    let app = test_app(in_memory_state()).await;

    let response =
        actix_test::call_service(&app, post_json("/questions", r#"["Why is the sky blue?"]"#))
            .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = actix_test::TestRequest::get().uri("/questions").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(body, json!({"status": "OK", "data": []}));
}

#[rstest]
#[case(json!({"text": ""}), "Это поле обязательно")]
#[case(json!({}), "Это поле обязательно")]
#[case(json!({"text": "ж".repeat(1001)}), "Максимум 1000 символов")]
#[actix_web::test]
async fn invalid_answer_text_is_reported_per_field(#[case] payload: Value, #[case] message: &str) {
    let app = test_app(in_memory_state()).await;
    actix_test::call_service(&app, post_json("/questions", r#"{"text":"Why?!"}"#)).await;
    let request = actix_test::TestRequest::post()
        .uri("/questions/1/answers")
        .set_json(payload)
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"status": "Error", "errors": {"Text": message}}));

    let detail = actix_test::TestRequest::get().uri("/questions/1").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, detail).await;
    assert_eq!(body["answers"], json!([]));
}

#[actix_web::test]
async fn longest_answer_text_is_accepted() {
    let app = test_app(in_memory_state()).await;
    actix_test::call_service(&app, post_json("/questions", r#"{"text":"Why?!"}"#)).await;
    let request = actix_test::TestRequest::post()
        .uri("/questions/1/answers")
        .set_json(json!({"text": "ж".repeat(1000)}))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn list_questions_returns_creation_order() {
    let app = test_app(in_memory_state()).await;
    for payload in [r#"{"text":"first?"}"#, r#"{"text":"second?"}"#] {
        let response = actix_test::call_service(&app, post_json("/questions", payload)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let request = actix_test::TestRequest::get().uri("/questions").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "OK");
    let texts: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|item| item["text"].as_str())
        .collect();
    assert_eq!(texts, vec!["first?", "second?"]);
}

#[actix_web::test]
async fn empty_list_is_an_empty_array() {
    let app = test_app(in_memory_state()).await;
    let request = actix_test::TestRequest::get().uri("/questions").to_request();

    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!({"status": "OK", "data": []}));
}

#[actix_web::test]
async fn question_detail_embeds_answers() {
    let app = test_app(in_memory_state()).await;
    actix_test::call_service(&app, post_json("/questions", r#"{"text":"Why?!"}"#)).await;
    let response = actix_test::call_service(
        &app,
        post_json("/questions/1/answers", r#"{"text":"Because."}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created: Value = actix_test::read_body_json(response).await;
    assert_eq!(created, json!({"status": "OK", "id": 1}));

    let request = actix_test::TestRequest::get().uri("/questions/1").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["status"], "OK");
    assert_eq!(body["question"]["id"], 1);
    assert_eq!(body["answers"][0]["text"], "Because.");
}

#[actix_web::test]
async fn answering_a_missing_question_is_not_found() {
    let app = test_app(in_memory_state()).await;

    let response = actix_test::call_service(
        &app,
        post_json("/questions/404/answers", r#"{"text":"Because."}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["errors"]["error"], "question 404 not found");
}

#[actix_web::test]
async fn deleting_a_question_removes_it() {
    let app = test_app(in_memory_state()).await;
    actix_test::call_service(&app, post_json("/questions", r#"{"text":"Why?!"}"#)).await;

    let delete = actix_test::TestRequest::delete().uri("/questions/1").to_request();
    let response = actix_test::call_service(&app, delete).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"status": "OK"}));

    let again = actix_test::TestRequest::delete().uri("/questions/1").to_request();
    let response = actix_test::call_service(&app, again).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(Method::GET, "/questions/abc")]
#[case(Method::DELETE, "/questions/-1")]
#[case(Method::POST, "/questions/1.5/answers")]
#[actix_web::test]
async fn non_numeric_ids_are_bad_requests(#[case] method: Method, #[case] uri: &str) {
    let app = test_app(in_memory_state()).await;
    let request = actix_test::TestRequest::default()
        .method(method)
        .uri(uri)
        .set_payload(r#"{"text":"Because."}"#)
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["errors"]["error"], "id must be an unsigned integer");
}

#[rstest]
#[case(Method::PUT, "/questions")]
#[case(Method::DELETE, "/questions")]
#[case(Method::POST, "/questions/1")]
#[case(Method::GET, "/questions/1/answers")]
#[case(Method::PATCH, "/answers/1")]
#[actix_web::test]
async fn unsupported_methods_get_plain_text_405(#[case] method: Method, #[case] uri: &str) {
    let app = test_app(in_memory_state()).await;
    let request = actix_test::TestRequest::default()
        .method(method)
        .uri(uri)
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert!(content_type.is_some_and(|value| value.starts_with("text/plain")));
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), b"method not allowed");
}

#[rstest]
#[case(
    Error::service_unavailable("list questions: connection refused"),
    StatusCode::SERVICE_UNAVAILABLE,
    "service unavailable"
)]
#[case(
    Error::internal("list questions: relation does not exist"),
    StatusCode::INTERNAL_SERVER_ERROR,
    "internal server error"
)]
#[actix_web::test]
async fn storage_failures_are_redacted(
    #[case] failure: Error,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let mut query = MockQuestionsQuery::new();
    query
        .expect_list_questions()
        .times(1)
        .return_once(move || Err(failure));
    let app = test_app(mocked_state(MockQuestionsCommand::new(), query)).await;

    let request = actix_test::TestRequest::get().uri("/questions").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"status": "Error", "errors": {"error": message}}));
}

#[actix_web::test]
async fn validation_runs_before_the_command_port() {
    let mut command = MockQuestionsCommand::new();
    command.expect_create_question().times(0);
    let app = test_app(mocked_state(command, MockQuestionsQuery::new())).await;

    let response = actix_test::call_service(&app, post_json("/questions", r#"{"text":"ab"}"#)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
