// src/quiz/mod.rs

pub mod controller;
pub mod notify;
pub mod progress;

use std::fmt;

use crate::gateway::GenerateError;

/// Failure classes of the quiz controller.
///
/// Every variant leaves the controller interactive: precondition
/// failures mutate nothing, and a failed generation leaves the session
/// empty and retryable.
#[derive(Debug)]
pub enum QuizError {
    /// No credential has been entered yet.
    MissingApiKey,

    /// The selected level's unlock threshold has not been reached.
    LevelLocked { level: u8, required: u32 },

    /// A fetch is already pending; a second one would race it and
    /// silently drop one result.
    FetchInFlight,

    /// The session was already graded; grading again would double-count
    /// the score.
    AlreadySubmitted,

    /// The generation round-trip failed.
    Generation(GenerateError),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::MissingApiKey => {
                write!(f, "API Key is not set. Please provide your API key.")
            }
            QuizError::LevelLocked { level, required } => write!(
                f,
                "You need {} points to unlock Level {}. Keep practicing on lower levels!",
                required, level
            ),
            QuizError::FetchInFlight => {
                write!(f, "Questions are already being generated. Please wait.")
            }
            QuizError::AlreadySubmitted => {
                write!(f, "This quiz has already been submitted.")
            }
            QuizError::Generation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for QuizError {}

impl From<GenerateError> for QuizError {
    fn from(err: GenerateError) -> Self {
        QuizError::Generation(err)
    }
}
