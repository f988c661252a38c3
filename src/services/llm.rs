//! Hosted language-model capability.
//!
//! The model is consulted as a black box: one prompt in, free text out.
//! All parsing happens in the callers. Handlers reach the model through
//! [`generate_bounded`], which never retries and gives up after a fixed
//! wait without cancelling the request already in flight.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::error::LlmError;

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Claude Messages API client.
pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl ClaudeClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl LanguageModel for ClaudeClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": 512,
                "messages": [{
                    "role": "user",
                    "content": prompt
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let claude_response: serde_json::Value = response.json().await?;
        let text = claude_response["content"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .trim();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// Run one model call on its own task and wait at most `timeout` for it.
/// On expiry the task is left to finish in the background and its result
/// is discarded.
pub async fn generate_bounded(
    model: Arc<dyn LanguageModel>,
    prompt: String,
    timeout: Duration,
) -> Result<String, LlmError> {
    let task = tokio::spawn(async move { model.generate(&prompt).await });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(LlmError::Aborted(join_error.to_string())),
        Err(_) => Err(LlmError::Timeout(timeout)),
    }
}
