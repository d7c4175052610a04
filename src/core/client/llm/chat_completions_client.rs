use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::settings::LlmSettings;
use crate::errors::AppError;

use super::llm_client_trait::{LlmClient, LlmCompletion, LlmMessage};

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ChatCompletionsClient {
    client: Client,
    settings: LlmSettings,
    url: String,
}

impl ChatCompletionsClient {
    pub fn new(settings: LlmSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;
        let url = completions_url(settings.base_url());

        Ok(Self {
            client,
            settings,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_body(&self, messages: Vec<LlmMessage>) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages,
            max_tokens: self.settings.max_output_tokens,
            temperature: self.settings.temperature,
            stream: false,
        }
    }
}

pub fn completions_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<LlmMessage>,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, messages: Vec<LlmMessage>) -> Result<LlmCompletion> {
        let token = self
            .settings
            .api_key
            .clone()
            .ok_or_else(|| AppError::ServiceUnavailable("LLM_API_KEY is not configured".into()))?;

        let body = self.request_body(messages);
        debug!(
            provider = self.settings.provider.as_code(),
            model = %body.model,
            messages = body.messages.len(),
            "Calling LLM"
        );

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to call LLM (url={}): {}", self.url, e)))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read LLM response: {}", e)))?;

        parse_completion(status, &text, &self.url, body.model)
    }
}

/// Turn a raw provider answer into a completion. Non-2xx, undecodable bodies
/// and empty content are upstream failures.
fn parse_completion(
    status: StatusCode,
    text: &str,
    url: &str,
    requested_model: String,
) -> Result<LlmCompletion> {
    if !status.is_success() {
        return Err(AppError::Upstream(format!(
            "LLM returned {}: {} (url={})",
            status, text, url
        ))
        .into());
    }

    let parsed: ChatResponse = serde_json::from_str(text)
        .map_err(|e| AppError::Upstream(format!("Failed to decode LLM response: {}", e)))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Upstream("LLM returned no content".into()))?;

    Ok(LlmCompletion {
        content,
        model: parsed.model.unwrap_or(requested_model),
    })
}
