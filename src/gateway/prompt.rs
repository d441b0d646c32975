// src/gateway/prompt.rs

use crate::models::question::Language;

/// Shared instruction block that keeps the model from wrapping its reply
/// in prose or markdown fences. Extraction still defends against models
/// that ignore it.
const JSON_ONLY_PREAMBLE: &str = r#"You are an API that returns JSON. Do not speak in conversational language.
Your entire response must be ONLY the raw JSON object.
Do not use any markdown formatting (like ```json).
Your response must start immediately with "{" and end with "}"."#;

/// JLPT proficiency label for a difficulty level. `None` outside 1-5.
pub fn level_label(level: u8) -> Option<&'static str> {
    Some(match level {
        1 => "Beginner (JLPT N5)",
        2 => "Elementary (JLPT N4)",
        3 => "Intermediate (JLPT N3)",
        4 => "Upper-Intermediate (JLPT N2)",
        5 => "Advanced (JLPT N1)",
        _ => return None,
    })
}

/// Builds the generation prompt for one fetch, or `None` when the level
/// has no proficiency label.
pub fn build_prompt(level: u8, language: Language) -> Option<String> {
    let label = level_label(level)?;

    let body = match language {
        Language::English => format!(
            r#"Generate 5 multiple-choice questions for a Japanese language learner at the {} level. The questions should be in English, asking for the Japanese translation of a word or phrase.

The JSON object must have one key: "questions".
The value of "questions" must be an array of 5 objects.
Each object in the array MUST contain these six keys:
1. "question": A string in English (e.g., "What is 'apple' in Japanese?").
2. "options": An array of 4 strings (Japanese words or phrases).
3. "options_romaji": An array of 4 strings, the Romaji transliterations of "options" in the same order.
4. "answer": A string that is an exact match to one of the "options".
5. "hint": A string containing a helpful hint in English or simple hiragana.
6. "question_romaji": A string containing the Romaji transliteration of the correct answer."#,
            label
        ),
        Language::Japanese => format!(
            r#"Generate 5 multiple-choice questions for a Japanese language learner at the {} level. The questions should be in Japanese with a fill-in-the-blank.

The JSON object must have one key: "questions".
The value of "questions" must be an array of 5 objects.
Each object in the array MUST contain these five keys:
1. "question": A string in Japanese with a fill-in-the-blank (e.g., "🍎 これは_______です。"). For questions about objects, it MUST include an emoji for context.
2. "options": An array of 4 strings (Japanese words or phrases).
3. "answer": A string that is an exact match to one of the "options".
4. "hint": A string containing a helpful hint in English or simple hiragana.
5. "question_romaji": A string containing the literal Romaji transliteration of the "question" field.
   **Crucially, do NOT fill in the blank.** The "_______" characters must remain as "_______".
   **Example:** If the question is "🍎 これは_______です。", the question_romaji MUST be "🍎 kore wa _______ desu.""#,
            label
        ),
    };

    Some(format!("{}\n\n{}\n", JSON_ONLY_PREAMBLE, body))
}
