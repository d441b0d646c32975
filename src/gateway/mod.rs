// src/gateway/mod.rs

pub mod extract;
pub mod gemini;
pub mod prompt;
pub mod remote;

use std::fmt;

use async_trait::async_trait;

use crate::models::question::{Language, QuestionSet};

/// Boundary to the question generator.
///
/// One call per user-initiated fetch; no retries, no timeout. The server
/// proxy hands this a [`gemini::GeminiClient`], a browser-equivalent
/// client hands it a [`remote::RemoteGenerator`], tests hand it doubles.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        level: u8,
        language: Language,
    ) -> Result<QuestionSet, GenerateError>;
}

/// Failure classes of a generation round-trip.
#[derive(Debug)]
pub enum GenerateError {
    /// Rejected before any external call was made (missing credential,
    /// level out of range).
    Rejected(String),

    /// The model invocation itself failed (network, auth, quota).
    Invocation(String),

    /// The model replied, but no usable question set could be read out
    /// of the reply.
    Format(String),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Rejected(msg)
            | GenerateError::Invocation(msg)
            | GenerateError::Format(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for GenerateError {}
