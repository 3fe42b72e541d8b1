//! Google Gemini generateContent driver — the primary tier.
//!
//! Key differences from OpenAI-style APIs:
//! - Uses `contents` with `parts` instead of `messages` with `content`.
//! - `generationConfig` wraps temperature and max_tokens (→ `maxOutputTokens`).
//! - Response text lives at `candidates[0].content.parts[0].text`.
//! - The API key is passed as a `?key=` query parameter, not in headers.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::ResolverConfig;
use crate::error::ProviderError;
use crate::transport::HttpTransport;

use super::{require_text, ExplanationProvider, ProviderTag};

pub struct GeminiProvider {
    transport: HttpTransport,
    base_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: Option<f64>,
}

impl GeminiProvider {
    pub fn new(config: &ResolverConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            transport: HttpTransport::new(config.timeout)?,
            base_url: config.primary_base_url.clone(),
            model: config.primary_model.clone(),
            api_key: config.primary_key.clone().unwrap_or_default(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn build_body(&self, prompt: &str) -> Value {
        let mut gen_config = json!({ "maxOutputTokens": self.max_tokens });
        if let Some(t) = self.temperature {
            gen_config["temperature"] = json!(t);
        }
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": gen_config,
        })
    }

    fn parse_text(body: &Value) -> Result<String, ProviderError> {
        let text = body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str());
        require_text(text, "candidates[0].content.parts[0].text")
    }
}

#[async_trait]
impl ExplanationProvider for GeminiProvider {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Primary
    }

    fn name(&self) -> &str {
        "gemini"
    }

    async fn try_explain(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = self.build_body(prompt);
        let resp = self
            .transport
            .post_json(&url, &[("key", self.api_key.as_str())], None, &body)
            .await?;
        Self::parse_text(&resp)
    }
}
