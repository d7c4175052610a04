use serde::{Deserialize, Serialize};

/// Supported LLM providers. All of them are reached through an
/// OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    #[serde(rename = "gpt")]
    Gpt,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "grok")]
    Grok,
    #[serde(rename = "huggingface")]
    HuggingFace,
}

impl LlmProvider {
    pub fn as_code(&self) -> &'static str {
        match self {
            LlmProvider::Gpt => "GPT",
            LlmProvider::Gemini => "GEMINI",
            LlmProvider::Grok => "GROK",
            LlmProvider::HuggingFace => "HUGGINGFACE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "GPT" | "OPENAI" => Some(LlmProvider::Gpt),
            "GEMINI" | "GOOGLE" => Some(LlmProvider::Gemini),
            "GROK" | "XAI" => Some(LlmProvider::Grok),
            "HUGGINGFACE" | "HF" => Some(LlmProvider::HuggingFace),
            _ => None,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmProvider::Gpt => "https://api.openai.com/v1",
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
            LlmProvider::Grok => "https://api.x.ai/v1",
            LlmProvider::HuggingFace => "https://router.huggingface.co/v1",
        }
    }
}
