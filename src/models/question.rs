// src/models/question.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// The literal marker standing in for the tested word in
/// fill-in-the-blank questions. The generator is instructed to carry it
/// into `question_romaji` verbatim, never filled in.
pub const BLANK_MARKER: &str = "_______";

/// Every question carries exactly this many candidate answers.
pub const OPTION_COUNT: usize = 4;

/// One multiple-choice quiz item as produced by the generation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Display text. Contains [`BLANK_MARKER`] in japanese question mode.
    pub question: String,

    /// Romaji transliteration of `question` (japanese mode) or of the
    /// correct answer (english mode).
    pub question_romaji: String,

    /// Candidate answers, order preserved. Uniqueness is not enforced.
    pub options: Vec<String>,

    /// Romaji transliterations parallel to `options`. Only requested for
    /// english question mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_romaji: Option<Vec<String>>,

    /// Exact string match against one entry of `options`.
    pub answer: String,

    /// Free-text help shown on demand.
    pub hint: String,
}

impl Question {
    /// Checks the structural shape the generator was instructed to
    /// produce. A violation makes the item ungradable (wrong option
    /// count, an answer no option can match) or misleading (a romaji
    /// line that gives the blank away).
    pub fn check(&self, language: Language) -> Result<(), QuestionFlaw> {
        if self.options.len() != OPTION_COUNT {
            return Err(QuestionFlaw::WrongOptionCount(self.options.len()));
        }
        if !self.options.contains(&self.answer) {
            return Err(QuestionFlaw::AnswerNotInOptions);
        }
        if language == Language::Japanese
            && self.question.contains(BLANK_MARKER)
            && !self.question_romaji.contains(BLANK_MARKER)
        {
            return Err(QuestionFlaw::BlankMarkerDropped);
        }
        Ok(())
    }
}

/// A structural defect in one generated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFlaw {
    WrongOptionCount(usize),
    AnswerNotInOptions,
    BlankMarkerDropped,
}

impl fmt::Display for QuestionFlaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionFlaw::WrongOptionCount(count) => {
                write!(f, "expected {} options, got {}", OPTION_COUNT, count)
            }
            QuestionFlaw::AnswerNotInOptions => {
                write!(f, "answer does not match any option")
            }
            QuestionFlaw::BlankMarkerDropped => {
                write!(f, "romaji line filled in the blank marker")
            }
        }
    }
}

/// Which language the question text itself is asked in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English questions asking for the Japanese translation.
    English,
    /// Japanese fill-in-the-blank questions.
    #[default]
    Japanese,
}

/// Successful generation payload: five questions per fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

/// Request body for `POST /api/generate`.
///
/// `api_key` and `level` are optional at the serde layer so that their
/// absence surfaces as a 400 from the handler rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[serde(rename = "apiKey", default)]
    pub api_key: Option<String>,

    #[validate(range(min = 1, max = 5, message = "level must be between 1 and 5"))]
    pub level: Option<u8>,

    #[serde(default)]
    pub language: Language,
}
