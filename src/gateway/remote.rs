// src/gateway/remote.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use url::Url;

use crate::gateway::{GenerateError, QuestionGenerator};
use crate::models::question::{Language, QuestionSet};

/// Generator that goes through the `/api/generate` proxy instead of
/// calling the model directly; the path a browser session takes.
#[derive(Debug, Clone)]
pub struct RemoteGenerator {
    client: Client,
    base_url: Url,
}

impl RemoteGenerator {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl QuestionGenerator for RemoteGenerator {
    async fn generate(
        &self,
        api_key: &str,
        level: u8,
        language: Language,
    ) -> Result<QuestionSet, GenerateError> {
        let url = self
            .base_url
            .join("api/generate")
            .map_err(|e| GenerateError::Invocation(format!("bad service URL: {}", e)))?;

        let response = self
            .client
            .post(url)
            .json(&json!({
                "apiKey": api_key,
                "level": level,
                "language": language,
            }))
            .send()
            .await
            .map_err(|e| {
                GenerateError::Invocation(format!("failed to reach the question service: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            // The proxy replies with {"error": "..."} bodies; surface that
            // message so the user sees the same text a direct caller would.
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("question service returned {}", status));

            return Err(if status.is_client_error() {
                GenerateError::Rejected(message)
            } else {
                GenerateError::Invocation(message)
            });
        }

        response.json::<QuestionSet>().await.map_err(|e| {
            GenerateError::Format(format!("question service reply did not parse: {}", e))
        })
    }
}
