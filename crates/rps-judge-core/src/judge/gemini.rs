//! HTTP client for the Gemini `generateContent` API.
//!
//! This module provides a real implementation of `CompletionClient` that
//! talks to a Gemini-compatible endpoint over JSON.

use super::traits::{CompletionClient, JudgeError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Completion client for Gemini
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client against the public endpoint with the default model
    pub fn new(api_key: impl Into<String>) -> Result<Self, JudgeError> {
        Self::with_options(api_key, DEFAULT_BASE_URL, DEFAULT_MODEL, Duration::from_secs(30))
    }

    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, JudgeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JudgeError::Backend(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Request body for one system instruction plus one user turn
pub fn request_body(system_prompt: &str, user_message: &str) -> Value {
    json!({
        "system_instruction": {
            "parts": [{ "text": system_prompt }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": user_message }]
        }]
    })
}

/// Pull the generated text out of a `generateContent` response
pub fn extract_text(response: &Value) -> Result<String, JudgeError> {
    if let Some(error) = response.get("error") {
        let msg = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        return Err(JudgeError::Backend(msg.to_string()));
    }

    let parts = response
        .pointer("/candidates/0/content/parts")
        .and_then(|p| p.as_array())
        .ok_or_else(|| JudgeError::Backend("No candidates in response".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        return Err(JudgeError::Backend("Empty completion".to_string()));
    }
    Ok(text)
}

#[async_trait]
impl CompletionClient for GeminiClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, JudgeError> {
        let body = request_body(system_prompt, user_message);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| JudgeError::Backend(e.to_string()))?;

        let status = response.status();
        let result: Value = response
            .json()
            .await
            .map_err(|e| JudgeError::Backend(e.to_string()))?;

        debug!(%status, "Gemini responded");

        if !status.is_success() && result.get("error").is_none() {
            return Err(JudgeError::Backend(format!("HTTP {status}")));
        }

        extract_text(&result)
    }
}
