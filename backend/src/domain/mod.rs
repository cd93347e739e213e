//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence adapters. Keep types immutable and document invariants in each
//! type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Question / Answer: persisted entities with validated text.
//! - FieldErrors / Violation: per-field validation vocabulary.
//! - QaService: driving port implementation over the repositories.

pub mod answer;
pub mod error;
pub mod ports;
pub mod qa_service;
pub mod question;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::answer::{Answer, AnswerId, AnswerText, NewAnswer};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::qa_service::QaService;
pub use self::question::{NewQuestion, Question, QuestionId, QuestionText};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, Username};
pub use self::validation::{FieldErrors, TextBounds, Violation};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
