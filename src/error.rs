// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::gateway::GenerateError;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request
    BadRequest(String),

    // 405 Method Not Allowed
    MethodNotAllowed,

    // 500 Internal Server Error (model call failed or unusable output)
    Generation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed".to_string(),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Question generation failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The AI failed to return questions in a valid format. Please try again."
                        .to_string(),
                )
            }
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `GenerateError` into the matching `AppError` class.
/// Allows using `?` operator on gateway calls in handlers.
impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Rejected(msg) => AppError::BadRequest(msg),
            GenerateError::Invocation(msg) | GenerateError::Format(msg) => {
                AppError::Generation(msg)
            }
        }
    }
}
