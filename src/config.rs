//! Resolver configuration.
//!
//! Credentials are read once at process start and carried in an explicit
//! struct; the resolve path performs no ambient environment lookups. A tier
//! is enabled only when its credential is present.

use std::env;
use std::time::Duration;

/// Default endpoint for the primary tier (Google Gemini generateContent).
pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default endpoint for the secondary tier (Hugging Face inference router,
/// OpenAI-compatible chat completions).
pub const HF_DEFAULT_BASE_URL: &str = "https://router.huggingface.co";

/// Configuration for [`MedicineExplanationResolver`](crate::MedicineExplanationResolver).
///
/// Base URLs are overridable primarily for testing with mock servers.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Credential for the primary tier. `None` disables the tier.
    pub primary_key: Option<String>,
    /// Credential for the secondary tier. `None` disables the tier.
    pub secondary_key: Option<String>,
    pub primary_base_url: String,
    pub secondary_base_url: String,
    pub primary_model: String,
    pub secondary_model: String,
    /// Upper bound on generated tokens per provider call.
    pub max_tokens: u32,
    /// Sampling temperature, passed through when set.
    pub temperature: Option<f64>,
    /// Per-call timeout. A timed-out call is an ordinary tier failure.
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            primary_key: None,
            secondary_key: None,
            primary_base_url: GEMINI_DEFAULT_BASE_URL.to_string(),
            secondary_base_url: HF_DEFAULT_BASE_URL.to_string(),
            primary_model: "gemini-2.0-flash".to_string(),
            secondary_model: "meta-llama/Llama-3.1-8B-Instruct".to_string(),
            max_tokens: 100,
            temperature: None,
            timeout: Duration::from_secs(8),
        }
    }
}

impl ResolverConfig {
    /// Read credentials from `GEMINI_API_KEY` / `HF_TOKEN` once. Empty values
    /// count as absent so a blank export does not enable a dead tier.
    pub fn from_env() -> Self {
        Self {
            primary_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            secondary_key: env::var("HF_TOKEN").ok().filter(|k| !k.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn with_primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = Some(key.into());
        self
    }

    pub fn with_secondary_key(mut self, key: impl Into<String>) -> Self {
        self.secondary_key = Some(key.into());
        self
    }

    /// Override the primary tier endpoint (mock servers, regional gateways).
    pub fn with_primary_base_url(mut self, url: impl Into<String>) -> Self {
        self.primary_base_url = url.into();
        self
    }

    /// Override the secondary tier endpoint.
    pub fn with_secondary_base_url(mut self, url: impl Into<String>) -> Self {
        self.secondary_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disables_both_tiers() {
        let config = ResolverConfig::default();
        assert!(config.primary_key.is_none());
        assert!(config.secondary_key.is_none());
        assert_eq!(config.max_tokens, 100);
        assert_eq!(config.timeout, Duration::from_secs(8));
    }

    #[test]
    fn test_builder_setters() {
        let config = ResolverConfig::default()
            .with_primary_key("pk")
            .with_secondary_base_url("http://localhost:9999")
            .with_timeout(Duration::from_millis(250))
            .with_temperature(0.2);
        assert_eq!(config.primary_key.as_deref(), Some("pk"));
        assert_eq!(config.secondary_base_url, "http://localhost:9999");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.temperature, Some(0.2));
    }
}
