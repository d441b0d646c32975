// src/handlers/generate.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    gateway::QuestionGenerator,
    models::question::GenerateRequest,
};

/// Proxies one question-generation request to the configured model.
///
/// * Rejects requests missing the API key or level before any external call.
/// * Performs exactly one model round-trip; failures are surfaced, never retried.
pub async fn generate_questions(
    State(generator): State<Arc<dyn QuestionGenerator>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let (api_key, level) = match (payload.api_key.as_deref(), payload.level) {
        (Some(key), Some(level)) if !key.is_empty() => (key, level),
        _ => {
            return Err(AppError::BadRequest(
                "API key and level are required".to_string(),
            ));
        }
    };

    let set = generator.generate(api_key, level, payload.language).await?;

    Ok(Json(set))
}

/// Catch-all for non-POST requests on the generate route.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
