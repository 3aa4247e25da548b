//! OpenAI-compatible chat completions over blocking HTTP

use crate::config::Settings;
use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::CompletionModel;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatMessage>,
}

impl ChatCompletionResponse {
    /// Trimmed content of the first choice
    pub fn into_text(self) -> Result<String, RequestError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .map(|m| m.content.trim().to_string())
            .ok_or(RequestError::EmptyResponse)
    }
}

/// Client for `/chat/completions` on an OpenAI-compatible endpoint
pub struct OpenAiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        temperature: f32,
    ) -> Result<Self, RequestError> {
        // No timeout: the request blocks until the endpoint answers
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(RequestError::Client)?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
            temperature,
        })
    }

    /// Endpoint and model from resolved settings, with an already validated key
    pub fn from_settings(settings: &Settings, api_key: &str) -> Result<Self, RequestError> {
        Self::new(
            settings.base_url.clone(),
            api_key.to_string(),
            settings.model.clone(),
            settings.temperature,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn request_body(&self, system: &str, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::new("system", system),
                ChatMessage::new("user", prompt),
            ],
            temperature: self.temperature,
        }
    }
}

impl CompletionModel for OpenAiClient {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, RequestError> {
        let url = self.endpoint();
        debug!(%url, model = %self.model, "requesting completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(system, prompt))
            .send()
            .map_err(|source| RequestError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RequestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().map_err(RequestError::Decode)?;
        parsed.into_text()
    }
}
