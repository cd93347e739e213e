//! Question API handlers.
//!
//! ```text
//! GET    /questions
//! POST   /questions {"text":"Why is the sky blue?"}
//! GET    /questions/{id}
//! DELETE /questions/{id}
//! POST   /questions/{id}/answers {"text":"Rayleigh scattering"}
//! ```

use actix_web::web;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::ports::{CreateAnswerRequest, CreateQuestionRequest, QuestionWithAnswers};
use crate::domain::{Answer, Question, QuestionId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::body::decode_json;
use crate::inbound::http::envelope::ValidationResponse;
use crate::inbound::http::identity::RequestIdentity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, required, validate_request};

/// Request body for `POST /questions`.
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateQuestionBody {
    #[serde(default)]
    #[validate(custom = "required", length(min = 3, max = 500))]
    #[schema(min_length = 3, max_length = 500, example = "Why is the sky blue?")]
    pub text: String,
}

/// Request body for `POST /questions/{id}/answers`.
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateAnswerBody {
    #[serde(default)]
    #[validate(custom = "required", length(min = 1, max = 1000))]
    #[schema(min_length = 1, max_length = 1000, example = "Rayleigh scattering")]
    pub text: String,
}

/// Question fields returned to clients.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct QuestionBody {
    pub id: u64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Question> for QuestionBody {
    fn from(value: Question) -> Self {
        Self {
            id: value.id.get(),
            text: value.text.into(),
            created_at: value.created_at,
        }
    }
}

/// Answer fields returned inside a question.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct AnswerSummaryBody {
    pub id: u64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Answer> for AnswerSummaryBody {
    fn from(value: Answer) -> Self {
        Self {
            id: value.id.get(),
            text: value.text.into(),
            created_at: value.created_at,
        }
    }
}

/// Response for `GET /questions`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct QuestionListResponse {
    #[serde(flatten)]
    pub envelope: ValidationResponse,
    pub data: Vec<QuestionBody>,
}

/// Response for `POST /questions`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct QuestionCreatedResponse {
    #[serde(flatten)]
    pub envelope: ValidationResponse,
    #[serde(flatten)]
    pub question: QuestionBody,
}

/// Response for `GET /questions/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct QuestionDetailResponse {
    #[serde(flatten)]
    pub envelope: ValidationResponse,
    pub question: QuestionBody,
    pub answers: Vec<AnswerSummaryBody>,
}

impl From<QuestionWithAnswers> for QuestionDetailResponse {
    fn from(value: QuestionWithAnswers) -> Self {
        Self {
            envelope: ValidationResponse::ok(),
            question: value.question.into(),
            answers: value.answers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response for `POST /questions/{id}/answers`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AnswerCreatedResponse {
    #[serde(flatten)]
    pub envelope: ValidationResponse,
    pub id: u64,
}

fn question_id(path: &str) -> ApiResult<QuestionId> {
    parse_id(path, FieldName::new("id")).map(QuestionId::new)
}

/// List every question ordered by id.
#[utoipa::path(
    get,
    path = "/questions",
    responses(
        (status = 200, description = "Questions", body = QuestionListResponse),
        (status = 405, description = "Method not allowed (plain text body)"),
        (status = 500, description = "Internal server error", body = ValidationResponse),
        (status = 503, description = "Storage unavailable", body = ValidationResponse)
    ),
    tags = ["questions"],
    operation_id = "listQuestions"
)]
pub async fn list_questions(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<QuestionListResponse>> {
    let questions = state.questions_query.list_questions().await?;
    info!(op = "list questions", count = questions.len(), "questions listed");
    Ok(web::Json(QuestionListResponse {
        envelope: ValidationResponse::ok(),
        data: questions.into_iter().map(Into::into).collect(),
    }))
}

/// Create a question.
///
/// # Examples
/// ```no_run
/// use actix_web::web;
/// use backend::inbound::http::ApiResult;
/// use backend::inbound::http::questions::{QuestionCreatedResponse, create_question};
/// use backend::inbound::http::state::HttpState;
///
/// async fn call_handler(
///     state: web::Data<HttpState>,
/// ) -> ApiResult<web::Json<QuestionCreatedResponse>> {
///     let body = web::Bytes::from_static(br#"{"text":"Why is the sky blue?"}"#);
///     create_question(state, body).await
/// }
/// ```
#[utoipa::path(
    post,
    path = "/questions",
    request_body = CreateQuestionBody,
    responses(
        (status = 200, description = "Question created", body = QuestionCreatedResponse),
        (status = 400, description = "Empty, malformed or invalid body", body = ValidationResponse),
        (status = 405, description = "Method not allowed (plain text body)"),
        (status = 500, description = "Internal server error", body = ValidationResponse),
        (status = 503, description = "Storage unavailable", body = ValidationResponse)
    ),
    tags = ["questions"],
    operation_id = "createQuestion"
)]
pub async fn create_question(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<QuestionCreatedResponse>> {
    let payload: CreateQuestionBody = decode_json(&body)?;
    validate_request(&payload)?;

    let question = state
        .questions
        .create_question(CreateQuestionRequest { text: payload.text })
        .await?;
    Ok(web::Json(QuestionCreatedResponse {
        envelope: ValidationResponse::ok(),
        question: question.into(),
    }))
}

/// Fetch a question with its answers.
#[utoipa::path(
    get,
    path = "/questions/{id}",
    params(("id" = u64, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "Question with answers", body = QuestionDetailResponse),
        (status = 400, description = "Identifier is not an unsigned integer", body = ValidationResponse),
        (status = 404, description = "Question not found", body = ValidationResponse),
        (status = 503, description = "Storage unavailable", body = ValidationResponse)
    ),
    tags = ["questions"],
    operation_id = "getQuestion"
)]
pub async fn get_question(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<QuestionDetailResponse>> {
    let id = question_id(&path)?;
    let found = state.questions_query.get_question_with_answers(id).await?;
    Ok(web::Json(found.into()))
}

/// Delete a question and its answers.
#[utoipa::path(
    delete,
    path = "/questions/{id}",
    params(("id" = u64, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "Question deleted", body = ValidationResponse),
        (status = 400, description = "Identifier is not an unsigned integer", body = ValidationResponse),
        (status = 404, description = "Question not found", body = ValidationResponse),
        (status = 503, description = "Storage unavailable", body = ValidationResponse)
    ),
    tags = ["questions"],
    operation_id = "deleteQuestion"
)]
pub async fn delete_question(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ValidationResponse>> {
    let id = question_id(&path)?;
    state.questions.delete_question(id).await?;
    Ok(web::Json(ValidationResponse::ok()))
}

/// Answer a question as the requesting user.
#[utoipa::path(
    post,
    path = "/questions/{id}/answers",
    params(("id" = u64, Path, description = "Question identifier")),
    request_body = CreateAnswerBody,
    responses(
        (status = 200, description = "Answer created", body = AnswerCreatedResponse),
        (status = 400, description = "Invalid identifier or body", body = ValidationResponse),
        (status = 404, description = "Question not found", body = ValidationResponse),
        (status = 503, description = "Storage unavailable", body = ValidationResponse)
    ),
    tags = ["answers"],
    operation_id = "createAnswer"
)]
pub async fn create_answer(
    state: web::Data<HttpState>,
    identity: RequestIdentity,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<AnswerCreatedResponse>> {
    let question_id = question_id(&path)?;
    let payload: CreateAnswerBody = decode_json(&body)?;
    validate_request(&payload)?;

    let answer = state
        .questions
        .create_answer(CreateAnswerRequest {
            question_id,
            user_id: identity.user_id(),
            text: payload.text,
        })
        .await?;
    Ok(web::Json(AnswerCreatedResponse {
        envelope: ValidationResponse::ok(),
        id: answer.id.get(),
    }))
}

#[cfg(test)]
#[path = "questions_tests.rs"]
mod tests;
