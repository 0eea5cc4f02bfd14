//! Web API error type and its HTTP response conversion.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::Error;

/// An error on its way to the client as `{ "error": message }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Map a crate error, using `fallback` when the error has no text.
    ///
    /// Validation errors become 400; everything else is a 500 carrying the
    /// provider's message.
    pub fn from_error(err: &Error, fallback: &str) -> Self {
        let message = err.to_string();
        let message = if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        };
        if err.is_validation() {
            Self::bad_request(message)
        } else {
            Self::internal(message)
        }
    }

    /// A body that is not JSON, or has a non-string prompt.
    pub fn from_rejection(rejection: &JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PROMPT_REQUIRED;

    #[test]
    fn validation_maps_to_400() {
        let api = ApiError::from_error(&Error::prompt_required(), "fallback");
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.message, PROMPT_REQUIRED);
    }

    #[test]
    fn upstream_maps_to_500_with_provider_text() {
        let api = ApiError::from_error(&Error::upstream("openai", "Bad credentials"), "fallback");
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Bad credentials");
    }

    #[test]
    fn parse_errors_also_map_to_500() {
        let api = ApiError::from_error(&Error::upstream_parse("openai", "not JSON"), "fallback");
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_message_uses_fallback() {
        let api = ApiError::from_error(&Error::upstream("replicate", ""), "Failed to generate image");
        assert_eq!(api.message, "Failed to generate image");
    }
}
