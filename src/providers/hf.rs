//! Hugging Face inference router driver — the secondary tier.
//!
//! The router speaks the OpenAI chat completions format: bearer auth,
//! `messages` array, response text at `choices[0].message.content`. Going
//! through the router rather than per-model URLs avoids the 404/410 churn of
//! retired hosted endpoints.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::ResolverConfig;
use crate::error::ProviderError;
use crate::transport::HttpTransport;

use super::{require_text, ExplanationProvider, ProviderTag};

pub struct HuggingFaceProvider {
    transport: HttpTransport,
    base_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: Option<f64>,
}

impl HuggingFaceProvider {
    pub fn new(config: &ResolverConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            transport: HttpTransport::new(config.timeout)?,
            base_url: config.secondary_base_url.clone(),
            model: config.secondary_model.clone(),
            api_key: config.secondary_key.clone().unwrap_or_default(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn build_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": self.max_tokens,
        });
        if let Some(t) = self.temperature {
            body["temperature"] = json!(t);
        }
        body
    }

    fn parse_text(body: &Value) -> Result<String, ProviderError> {
        let text = body
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str());
        require_text(text, "choices[0].message.content")
    }
}

#[async_trait]
impl ExplanationProvider for HuggingFaceProvider {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Secondary
    }

    fn name(&self) -> &str {
        "huggingface"
    }

    async fn try_explain(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_body(prompt);
        let resp = self
            .transport
            .post_json(&url, &[], Some(&self.api_key), &body)
            .await?;
        Self::parse_text(&resp)
    }
}
