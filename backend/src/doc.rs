//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every question, answer and health endpoint together
//! with the envelope and payload schemas. The document backs Swagger UI in
//! debug builds and is exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::answers::AnswerResponse;
use crate::inbound::http::envelope::{Status, ValidationResponse};
use crate::inbound::http::questions::{
    AnswerCreatedResponse, AnswerSummaryBody, CreateAnswerBody, CreateQuestionBody,
    QuestionBody, QuestionCreatedResponse, QuestionDetailResponse, QuestionListResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Questions and answers API",
        description = "Create, read and delete questions and their answers. \
            Every JSON response carries a `status` of `OK` or `Error` and, on \
            error, an `errors` map keyed by field name."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::questions::get_question,
        crate::inbound::http::questions::delete_question,
        crate::inbound::http::questions::create_answer,
        crate::inbound::http::answers::get_answer,
        crate::inbound::http::answers::delete_answer,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Status,
        ValidationResponse,
        CreateQuestionBody,
        CreateAnswerBody,
        QuestionBody,
        AnswerSummaryBody,
        QuestionListResponse,
        QuestionCreatedResponse,
        QuestionDetailResponse,
        AnswerCreatedResponse,
        AnswerResponse,
    )),
    tags(
        (name = "questions", description = "Questions and their answers"),
        (name = "answers", description = "Individual answers"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
