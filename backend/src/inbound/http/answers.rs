//! Answer API handlers.
//!
//! ```text
//! GET    /answers/{id}
//! DELETE /answers/{id}
//! ```
//!
//! Answers are created through `POST /questions/{id}/answers`; see
//! [`crate::inbound::http::questions::create_answer`].

use actix_web::web;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Answer, AnswerId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ValidationResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Response for `GET /answers/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AnswerResponse {
    #[serde(flatten)]
    pub envelope: ValidationResponse,
    pub id: u64,
    pub question_id: u64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Answer> for AnswerResponse {
    fn from(value: Answer) -> Self {
        Self {
            envelope: ValidationResponse::ok(),
            id: value.id.get(),
            question_id: value.question_id.get(),
            text: value.text.into(),
            created_at: value.created_at,
        }
    }
}

fn answer_id(path: &str) -> ApiResult<AnswerId> {
    parse_id(path, FieldName::new("id")).map(AnswerId::new)
}

/// Fetch a single answer.
#[utoipa::path(
    get,
    path = "/answers/{id}",
    params(("id" = u64, Path, description = "Answer identifier")),
    responses(
        (status = 200, description = "Answer", body = AnswerResponse),
        (status = 400, description = "Identifier is not an unsigned integer", body = ValidationResponse),
        (status = 404, description = "Answer not found", body = ValidationResponse),
        (status = 503, description = "Storage unavailable", body = ValidationResponse)
    ),
    tags = ["answers"],
    operation_id = "getAnswer"
)]
pub async fn get_answer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AnswerResponse>> {
    let id = answer_id(&path)?;
    let answer = state.questions_query.get_answer(id).await?;
    Ok(web::Json(answer.into()))
}

/// Delete a single answer.
#[utoipa::path(
    delete,
    path = "/answers/{id}",
    params(("id" = u64, Path, description = "Answer identifier")),
    responses(
        (status = 200, description = "Answer deleted", body = ValidationResponse),
        (status = 400, description = "Identifier is not an unsigned integer", body = ValidationResponse),
        (status = 404, description = "Answer not found", body = ValidationResponse),
        (status = 503, description = "Storage unavailable", body = ValidationResponse)
    ),
    tags = ["answers"],
    operation_id = "deleteAnswer"
)]
pub async fn delete_answer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ValidationResponse>> {
    let id = answer_id(&path)?;
    state.questions.delete_answer(id).await?;
    Ok(web::Json(ValidationResponse::ok()))
}

#[cfg(test)]
mod tests {
    //! Handler coverage with mocked driving ports.
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test as actix_test};
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{MockQuestionsCommand, MockQuestionsQuery};
    use crate::domain::{AnswerText, Error, QuestionId, UserId};
    use crate::inbound::http::routes::configure;

    fn state(command: MockQuestionsCommand, query: MockQuestionsQuery) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(Arc::new(command), Arc::new(query)))
    }

    fn sample_answer(id: u64) -> Answer {
        Answer {
            id: AnswerId::new(id),
            question_id: QuestionId::new(2),
            user_id: UserId::ANONYMOUS,
            text: AnswerText::new("Rayleigh scattering").expect("valid text"),
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn get_answer_returns_payload() {
        let mut query = MockQuestionsQuery::new();
        query
            .expect_get_answer()
            .withf(|id| *id == AnswerId::new(9))
            .return_once(|id| Ok(sample_answer(id.get())));
        let app = actix_test::init_service(
            App::new()
                .app_data(state(MockQuestionsCommand::new(), query))
                .configure(configure),
        )
        .await;

        let request = actix_test::TestRequest::get().uri("/answers/9").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["id"], 9);
        assert_eq!(body["question_id"], 2);
        assert_eq!(body["text"], "Rayleigh scattering");
    }

    #[rstest]
    #[case(Error::not_found("answer 9 not found"), StatusCode::NOT_FOUND)]
    #[case(Error::service_unavailable("delete answer: refused"), StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn delete_answer_maps_service_errors(#[case] failure: Error, #[case] status: StatusCode) {
        let mut command = MockQuestionsCommand::new();
        command
            .expect_delete_answer()
            .times(1)
            .return_once(move |_| Err(failure));
        let app = actix_test::init_service(
            App::new()
                .app_data(state(command, MockQuestionsQuery::new()))
                .configure(configure),
        )
        .await;

        let request = actix_test::TestRequest::delete()
            .uri("/answers/9")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), status);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], "Error");
    }

    #[actix_web::test]
    async fn non_numeric_id_is_rejected_before_the_service() {
        let mut query = MockQuestionsQuery::new();
        query.expect_get_answer().times(0);
        let app = actix_test::init_service(
            App::new()
                .app_data(state(MockQuestionsCommand::new(), query))
                .configure(configure),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/answers/abc")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["errors"]["error"], "id must be an unsigned integer");
    }
}
