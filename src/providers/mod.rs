//! Explanation provider abstraction layer.
//!
//! Each live tier of the fallback chain implements [`ExplanationProvider`].
//! The trait is object-safe and dispatched through `Box<dyn ExplanationProvider>`
//! so the resolver can walk an ordered, heterogeneous provider list without
//! hardcoding vendor-specific logic.

pub mod gemini;
pub mod hf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ResolverConfig;
use crate::error::ProviderError;
use crate::{Error, Result};

pub use gemini::GeminiProvider;
pub use hf::HuggingFaceProvider;

/// Which tier of the fallback chain produced an explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTag {
    Primary,
    Secondary,
    Offline,
}

impl ProviderTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderTag::Primary => "primary",
            ProviderTag::Secondary => "secondary",
            ProviderTag::Offline => "offline",
        }
    }
}

impl std::fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract for one live tier of the fallback chain.
///
/// A call either yields non-empty text or a [`ProviderError`]; it must not
/// panic and must not block past the configured timeout. Providers are
/// stateless per call, so concurrent resolutions need no coordination.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    /// Tier this provider answers for.
    fn tag(&self) -> ProviderTag;

    /// Short provider name for log lines.
    fn name(&self) -> &str;

    /// Attempt one explanation. A single failed attempt is final for this
    /// provider for this request; the chain never retries within a tier.
    async fn try_explain(&self, prompt: &str) -> std::result::Result<String, ProviderError>;
}

/// Build the ordered provider list from configuration.
///
/// A tier is enabled only when its credential is present; disabled tiers are
/// skipped without being constructed, so they can never be invoked.
pub fn from_config(config: &ResolverConfig) -> Result<Vec<Box<dyn ExplanationProvider>>> {
    let mut providers: Vec<Box<dyn ExplanationProvider>> = Vec::new();

    if config.primary_key.is_some() {
        let provider = GeminiProvider::new(config)
            .map_err(|e| Error::Configuration(format!("primary provider: {e}")))?;
        providers.push(Box::new(provider));
    }

    if config.secondary_key.is_some() {
        let provider = HuggingFaceProvider::new(config)
            .map_err(|e| Error::Configuration(format!("secondary provider: {e}")))?;
        providers.push(Box::new(provider));
    }

    Ok(providers)
}

/// Extract trimmed, non-empty text from a parsed payload field.
///
/// Blank or missing text is a failure: an empty explanation must never be
/// shown to a patient, so the chain treats it like any other provider error.
pub(crate) fn require_text(
    text: Option<&str>,
    field: &str,
) -> std::result::Result<String, ProviderError> {
    match text {
        None => Err(ProviderError::MalformedResponse(format!(
            "missing {field} in response"
        ))),
        Some(s) if s.trim().is_empty() => Err(ProviderError::EmptyResponse),
        Some(s) => Ok(s.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_serialization_is_lowercase() {
        let json = serde_json::to_string(&ProviderTag::Primary).unwrap();
        assert_eq!(json, r#""primary""#);
        assert_eq!(ProviderTag::Offline.to_string(), "offline");
    }

    #[test]
    fn test_from_config_respects_credentials() {
        let none = from_config(&ResolverConfig::default()).unwrap();
        assert!(none.is_empty());

        let both = from_config(
            &ResolverConfig::default()
                .with_primary_key("pk")
                .with_secondary_key("sk"),
        )
        .unwrap();
        assert_eq!(both.len(), 2);
        assert_eq!(both[0].tag(), ProviderTag::Primary);
        assert_eq!(both[1].tag(), ProviderTag::Secondary);

        let secondary_only =
            from_config(&ResolverConfig::default().with_secondary_key("sk")).unwrap();
        assert_eq!(secondary_only.len(), 1);
        assert_eq!(secondary_only[0].tag(), ProviderTag::Secondary);
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("  ok  "), "f").unwrap(), "ok");
        assert!(matches!(
            require_text(Some("   "), "f"),
            Err(ProviderError::EmptyResponse)
        ));
        assert!(matches!(
            require_text(None, "f"),
            Err(ProviderError::MalformedResponse(_))
        ));
    }
}
