// src/gateway/gemini.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use url::Url;

use crate::gateway::{GenerateError, QuestionGenerator, extract, prompt};
use crate::models::question::{Language, QuestionSet};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Direct client for the Gemini `generateContent` endpoint.
///
/// Performs exactly one round-trip per fetch. Failures are surfaced to
/// the caller, never retried, and no timeout is applied beyond what the
/// transport imposes.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: Url,
    model: String,
}

impl GeminiClient {
    pub fn new(api_base: Url, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base,
            model: model.into(),
        }
    }

    fn endpoint(&self, api_key: &str) -> Result<Url, GenerateError> {
        let mut url = self
            .api_base
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| GenerateError::Invocation(format!("bad generation endpoint: {}", e)))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

#[async_trait]
impl QuestionGenerator for GeminiClient {
    async fn generate(
        &self,
        api_key: &str,
        level: u8,
        language: Language,
    ) -> Result<QuestionSet, GenerateError> {
        if api_key.is_empty() {
            return Err(GenerateError::Rejected(
                "API key and level are required".to_string(),
            ));
        }
        let prompt = prompt::build_prompt(level, language).ok_or_else(|| {
            GenerateError::Rejected(format!("level {} is out of range", level))
        })?;

        let payload = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let response = self
            .client
            .post(self.endpoint(api_key)?)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                GenerateError::Invocation(format!("failed to reach the generation API: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            tracing::error!("Generation API returned {}: {}", status, body);
            return Err(GenerateError::Invocation(format!(
                "generation API returned {}",
                status
            )));
        }

        let reply: Value = response.json().await.map_err(|e| {
            GenerateError::Invocation(format!("failed to read the generation API reply: {}", e))
        })?;

        let text = completion_text(&reply).ok_or_else(|| {
            tracing::error!("Generation API reply carried no text content: {}", reply);
            GenerateError::Format("the model reply carried no text content".to_string())
        })?;

        extract::parse_question_set(&text, language)
    }
}

/// Joins the text parts of the first candidate, if any.
fn completion_text(reply: &Value) -> Option<String> {
    let parts = reply
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let mut buffer = String::new();
    for part in parts {
        if let Some(text) = part.get("text").and_then(Value::as_str) {
            buffer.push_str(text);
        }
    }
    if buffer.is_empty() { None } else { Some(buffer) }
}
