//! Response envelope shared by every JSON endpoint.
//!
//! ```text
//! {"status":"OK"}
//! {"status":"Error","errors":{"Text":"Минимум 3 символов"}}
//! ```
//!
//! Endpoint payloads embed [`ValidationResponse`] with `#[serde(flatten)]` so
//! `status` and `errors` sit beside the payload fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldErrors;

/// Key used for errors that are not tied to a field.
pub const GENERAL_ERROR_KEY: &str = "error";

/// Outcome marker of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// Status plus optional per-field error messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = json!({"Text": "Это поле обязательно"}))]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ValidationResponse {
    /// Successful outcome without errors.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::envelope::ValidationResponse;
    ///
    /// let body = serde_json::to_string(&ValidationResponse::ok()).expect("serialise");
    /// assert_eq!(body, r#"{"status":"OK"}"#);
    /// ```
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            errors: None,
        }
    }

    /// Failed outcome with a single message keyed `"error"`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            errors: Some(BTreeMap::from([(
                GENERAL_ERROR_KEY.to_owned(),
                message.into(),
            )])),
        }
    }

    /// Failed outcome with one localized message per invalid field.
    pub fn validation_error(errors: &FieldErrors) -> Self {
        Self {
            status: Status::Error,
            errors: Some(errors.messages()),
        }
    }
}

impl Default for ValidationResponse {
    fn default() -> Self {
        Self::ok()
    }
}
