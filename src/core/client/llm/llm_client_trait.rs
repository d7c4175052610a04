use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: String,
    pub content: String,
}

impl LlmMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmCompletion {
    pub content: String,
    pub model: String,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// False when no API key is configured; callers should not call `complete`.
    fn is_configured(&self) -> bool;

    fn model(&self) -> &str;

    async fn complete(&self, messages: Vec<LlmMessage>) -> Result<LlmCompletion>;
}
