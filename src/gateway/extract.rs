// src/gateway/extract.rs

use serde::Deserialize;

use crate::gateway::GenerateError;
use crate::models::question::{Language, Question, QuestionSet};

/// Wrapper matching the instructed reply shape, with items left raw so a
/// single malformed entry cannot sink the whole batch.
#[derive(Deserialize)]
struct RawReply {
    questions: Vec<serde_json::Value>,
}

/// Cuts the candidate JSON document out of raw model text.
///
/// The model is instructed to reply with a bare object, but in practice
/// may still wrap it in prose. We take the span from the first `{` to
/// the last `}`. Trailing prose that contains its own `}` widens the
/// span and breaks the parse; known limitation of the heuristic.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parses raw model text into a screened [`QuestionSet`].
///
/// * No braces or unparsable JSON is a fatal format error for the request.
/// * A malformed item (missing fields, wrong option count, answer not
///   among the options, filled-in romaji blank) is logged and dropped.
/// * A reply with zero surviving items is a format error as well.
pub fn parse_question_set(raw: &str, language: Language) -> Result<QuestionSet, GenerateError> {
    let candidate = extract_json_object(raw).ok_or_else(|| {
        tracing::error!("No JSON object found in model reply: {}", raw);
        GenerateError::Format("no JSON object found in the model reply".to_string())
    })?;

    let reply: RawReply = serde_json::from_str(candidate).map_err(|e| {
        tracing::error!("Model reply failed to parse: {}; raw text: {}", e, raw);
        GenerateError::Format(format!("model reply is not a valid question set: {}", e))
    })?;

    let mut questions = Vec::with_capacity(reply.questions.len());
    for (index, item) in reply.questions.into_iter().enumerate() {
        let question: Question = match serde_json::from_value(item) {
            Ok(question) => question,
            Err(e) => {
                tracing::warn!("Dropping generated question {}: {}", index, e);
                continue;
            }
        };
        match question.check(language) {
            Ok(()) => questions.push(question),
            Err(flaw) => {
                tracing::warn!(
                    "Dropping generated question {} ({}): {}",
                    index,
                    flaw,
                    question.question
                );
            }
        }
    }

    if questions.is_empty() {
        return Err(GenerateError::Format(
            "no well-formed questions in the model reply".to_string(),
        ));
    }

    Ok(QuestionSet { questions })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "questions": [
            {
                "question": "🍎 これは_______です。",
                "question_romaji": "🍎 kore wa _______ desu.",
                "options": ["りんご", "みかん", "ばなな", "ぶどう"],
                "answer": "りんご",
                "hint": "A red fruit."
            }
        ]
    }"#;

    #[test]
    fn test_extract_strips_surrounding_prose() {
        let text = "Sure! Here you go: {\"questions\": []}\nHope that helps!";
        assert_eq!(extract_json_object(text), Some("{\"questions\": []}"));
    }

    #[test]
    fn test_extract_without_braces_is_none() {
        assert_eq!(extract_json_object("I cannot help with that."), None);
        assert_eq!(extract_json_object(""), None);
    }

    #[test]
    fn test_extract_with_reversed_braces_is_none() {
        assert_eq!(extract_json_object("} nothing here {"), None);
    }

    #[test]
    fn test_parse_accepts_prose_wrapped_reply() {
        let raw = format!("Sure!\n{}\nHope that helps!", WELL_FORMED);
        let set = parse_question_set(&raw, Language::Japanese).unwrap();
        assert_eq!(set.questions.len(), 1);
        assert_eq!(set.questions[0].answer, "りんご");
    }

    #[test]
    fn test_parse_without_json_is_format_error() {
        let result = parse_question_set("So sorry, no questions today.", Language::Japanese);
        assert!(matches!(result, Err(GenerateError::Format(_))));
    }

    #[test]
    fn test_parse_of_malformed_json_is_format_error() {
        let result = parse_question_set("{\"questions\": [", Language::Japanese);
        assert!(matches!(result, Err(GenerateError::Format(_))));
    }

    #[test]
    fn test_parse_drops_malformed_items_but_keeps_the_rest() {
        let raw = r#"{
            "questions": [
                {
                    "question": "🍎 これは_______です。",
                    "question_romaji": "🍎 kore wa _______ desu.",
                    "options": ["りんご", "みかん", "ばなな", "ぶどう"],
                    "answer": "りんご",
                    "hint": "A red fruit."
                },
                {
                    "question": "missing most fields",
                    "options": ["a", "b"]
                },
                {
                    "question": "答えが選択肢にない",
                    "question_romaji": "kotae ga sentakushi ni nai",
                    "options": ["あ", "い", "う", "え"],
                    "answer": "お",
                    "hint": "none"
                }
            ]
        }"#;
        let set = parse_question_set(raw, Language::Japanese).unwrap();
        assert_eq!(set.questions.len(), 1);
        assert_eq!(set.questions[0].answer, "りんご");
    }

    #[test]
    fn test_parse_with_only_malformed_items_is_format_error() {
        let raw = r#"{"questions": [{"question": "broken"}]}"#;
        let result = parse_question_set(raw, Language::Japanese);
        assert!(matches!(result, Err(GenerateError::Format(_))));
    }

    #[test]
    fn test_parse_keeps_romaji_blank_marker_rule_per_language() {
        let raw = r#"{
            "questions": [
                {
                    "question": "🍵 これは_______です。",
                    "question_romaji": "🍵 kore wa ocha desu.",
                    "options": ["おちゃ", "みず", "こめ", "さけ"],
                    "answer": "おちゃ",
                    "hint": "A hot drink."
                }
            ]
        }"#;
        // Filled-in romaji is a defect in japanese mode only.
        assert!(parse_question_set(raw, Language::Japanese).is_err());
        assert!(parse_question_set(raw, Language::English).is_ok());
    }
}
