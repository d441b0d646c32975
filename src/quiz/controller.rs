// src/quiz/controller.rs

use std::collections::HashMap;
use std::sync::Arc;

use crate::gateway::QuestionGenerator;
use crate::models::question::{Language, Question};
use crate::quiz::QuizError;
use crate::quiz::notify::Notifier;
use crate::quiz::progress::{self, ProgressStore};
use crate::utils::romaji;

/// Points awarded per correct answer.
const POINTS_PER_ANSWER: u32 = 10;

/// Points needed to move up one level.
const POINTS_PER_LEVEL: u32 = 100;

/// How candidate answers are rendered to the learner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerDisplay {
    /// Japanese text as generated.
    #[default]
    Japanese,
    /// Romaji transliteration only.
    Romaji,
    /// Japanese text with the romaji in parentheses.
    Both,
}

/// One quiz round. Created empty on every fetch attempt and replaced by
/// the next one; never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub level: u8,
    pub questions: Vec<Question>,
    pub user_answers: HashMap<usize, String>,
    pub submitted: bool,
    pub score: Option<u32>,
}

impl Session {
    fn new(level: u8) -> Self {
        Self {
            level,
            questions: Vec::new(),
            user_answers: HashMap::new(),
            submitted: false,
            score: None,
        }
    }

    /// Number of questions whose recorded answer exactly matches the
    /// expected one. Unanswered questions count as wrong.
    pub fn correct_count(&self) -> u32 {
        self.questions
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                self.user_answers.get(index).map(String::as_str)
                    == Some(question.answer.as_str())
            })
            .count() as u32
    }
}

/// Single source of truth for quiz state.
///
/// Owns the current session, the learner's cumulative score, and the
/// display preferences, and mediates every transition between them.
/// Collaborators are injected: the question generator, the progress
/// store, and the notification channel that surfaces blocking
/// conditions to the learner.
///
/// All operations take `&mut self`; the controller is single-threaded
/// by construction and holds at most one outstanding generation call.
pub struct QuizController {
    generator: Arc<dyn QuestionGenerator>,
    store: Box<dyn ProgressStore>,
    notifier: Box<dyn Notifier>,

    api_key: Option<String>,
    total_score: u32,
    session: Session,
    loading: bool,

    question_language: Language,
    answer_display: AnswerDisplay,
    visible_romaji: Option<usize>,
}

impl QuizController {
    /// Builds a controller, restoring the credential and cumulative
    /// score from the store. An unparsable stored score starts over at
    /// zero.
    pub fn new(
        generator: Arc<dyn QuestionGenerator>,
        store: Box<dyn ProgressStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let api_key = store.get(progress::API_KEY);
        let total_score = store
            .get(progress::TOTAL_SCORE)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);

        Self {
            generator,
            store,
            notifier,
            api_key,
            total_score,
            session: Session::new(1),
            loading: false,
            question_language: Language::default(),
            answer_display: AnswerDisplay::default(),
            visible_romaji: None,
        }
    }

    /// Whether the credential prompt should be shown at startup.
    pub fn needs_api_key(&self) -> bool {
        self.api_key.is_none()
    }

    /// Stores `key` as the active credential. No format validation; an
    /// invalid key surfaces later as a failed generation call.
    pub fn submit_api_key(&mut self, key: &str) {
        self.store.set(progress::API_KEY, key);
        self.api_key = Some(key.to_string());
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Cumulative score needed before `level` opens up. Level 1 is
    /// always open; scores never decrease, so an unlocked level stays
    /// unlocked.
    pub fn required_score(level: u8) -> u32 {
        u32::from(level.saturating_sub(1)) * POINTS_PER_LEVEL
    }

    pub fn is_unlocked(&self, level: u8) -> bool {
        self.total_score >= Self::required_score(level)
    }

    /// Starts a fresh session at `selected_level` and fills it with
    /// generated questions.
    ///
    /// Preconditions are checked in order before anything changes: a
    /// pending fetch, a missing credential, and the unlock threshold
    /// each refuse the call, notify the learner, and leave the current
    /// session untouched. Once they pass, the old session is discarded
    /// eagerly, so a failed generation leaves an empty session rather
    /// than a stale one. The loading flag clears on every exit path.
    pub async fn fetch_questions(&mut self, selected_level: u8) -> Result<(), QuizError> {
        if self.loading {
            return Err(self.refuse(QuizError::FetchInFlight));
        }
        let Some(api_key) = self.api_key.clone() else {
            return Err(self.refuse(QuizError::MissingApiKey));
        };
        let required = Self::required_score(selected_level);
        if self.total_score < required {
            return Err(self.refuse(QuizError::LevelLocked {
                level: selected_level,
                required,
            }));
        }

        self.session = Session::new(selected_level);
        self.visible_romaji = None;
        self.loading = true;

        let result = self
            .generator
            .generate(&api_key, selected_level, self.question_language)
            .await;
        self.loading = false;

        match result {
            Ok(set) => {
                self.session.questions = set.questions;
                Ok(())
            }
            Err(e) => Err(self.refuse(QuizError::Generation(e))),
        }
    }

    /// Records (or overwrites) the learner's choice for one question.
    ///
    /// Late writes after submission are not rejected here; the UI is
    /// expected to disable inputs once the session is graded.
    pub fn select_answer(&mut self, question_index: usize, option: &str) {
        self.session
            .user_answers
            .insert(question_index, option.to_string());
    }

    /// Grades the session: counts exact answer matches, banks the
    /// points, and persists the new cumulative score.
    ///
    /// Grading is not repeatable; a second call on the same session is
    /// refused so the score cannot be double-counted.
    pub fn submit_answers(&mut self) -> Result<u32, QuizError> {
        if self.session.submitted {
            return Err(QuizError::AlreadySubmitted);
        }

        let correct = self.session.correct_count();
        self.session.score = Some(correct);
        self.session.submitted = true;

        self.total_score += correct * POINTS_PER_ANSWER;
        self.store
            .set(progress::TOTAL_SCORE, &self.total_score.to_string());

        Ok(correct)
    }

    pub fn question_language(&self) -> Language {
        self.question_language
    }

    /// Sets which language the next fetched questions are asked in.
    /// Takes effect on the next fetch; the current session keeps its
    /// format.
    pub fn set_question_language(&mut self, language: Language) {
        self.question_language = language;
    }

    pub fn set_answer_display(&mut self, format: AnswerDisplay) {
        self.answer_display = format;
    }

    pub fn visible_romaji(&self) -> Option<usize> {
        self.visible_romaji
    }

    /// Shows the romaji aid for one question, or hides it when it is
    /// already the visible one.
    pub fn toggle_romaji(&mut self, question_index: usize) {
        self.visible_romaji = if self.visible_romaji == Some(question_index) {
            None
        } else {
            Some(question_index)
        };
    }

    /// Renders one candidate answer per the display preference, using
    /// the generated romaji when present and transliterating otherwise.
    /// `None` when either index is out of range.
    pub fn display_option(&self, question_index: usize, option_index: usize) -> Option<String> {
        let question = self.session.questions.get(question_index)?;
        let option = question.options.get(option_index)?;

        let rendered = match self.answer_display {
            AnswerDisplay::Japanese => option.clone(),
            AnswerDisplay::Romaji => self.option_romaji(question, option_index, option),
            AnswerDisplay::Both => format!(
                "{} ({})",
                option,
                self.option_romaji(question, option_index, option)
            ),
        };
        Some(rendered)
    }

    fn option_romaji(&self, question: &Question, option_index: usize, option: &str) -> String {
        question
            .options_romaji
            .as_ref()
            .and_then(|romaji| romaji.get(option_index).cloned())
            .unwrap_or_else(|| romaji::to_romaji(option))
    }

    fn refuse(&self, err: QuizError) -> QuizError {
        self.notifier.notify(&err.to_string());
        err
    }
}
