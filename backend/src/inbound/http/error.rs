//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the response envelope with a
//! matching status code and a `trace-id` header.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::envelope::ValidationResponse;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest
        | ErrorCode::EmptyBody
        | ErrorCode::MalformedBody
        | ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Envelope rendered for an error; server-side detail is replaced by the
/// code's default message.
fn envelope_for(error: &Error) -> ValidationResponse {
    match (error.code(), error.field_errors()) {
        (ErrorCode::InternalError | ErrorCode::ServiceUnavailable, _) => {
            ValidationResponse::error(error.code().default_message())
        }
        (_, Some(field_errors)) if !field_errors.is_empty() => {
            ValidationResponse::validation_error(field_errors)
        }
        _ => ValidationResponse::error(error.message()),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                code = %self.code(),
                trace_id = self.trace_id().unwrap_or_default(),
                error = %self,
                "request failed"
            );
        } else {
            warn!(
                code = %self.code(),
                trace_id = self.trace_id().unwrap_or_default(),
                error = %self,
                "request rejected"
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(envelope_for(self))
    }
}

#[cfg(test)]
mod tests;
