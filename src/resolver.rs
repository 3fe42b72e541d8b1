//! Ordered fallback chain over explanation providers.
//!
//! The resolver walks the enabled live tiers strictly in order — a later
//! tier is only attempted after the earlier one has fully failed — then
//! degrades to the offline dictionary and finally to a generic message.
//! `resolve` is total: it never errors and never returns empty text.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::offline;
use crate::providers::{self, ExplanationProvider, ProviderTag};
use crate::Result;

/// One explanation request: the prescribed medicine name, treated as opaque
/// text. Callers validate non-emptiness before resolving; the name is not
/// checked against a formulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationRequest {
    pub medicine: String,
}

impl ExplanationRequest {
    pub fn new(medicine: impl Into<String>) -> Self {
        Self {
            medicine: medicine.into(),
        }
    }
}

/// Outcome of a resolution.
///
/// `degraded` is true when no live provider produced the text; callers can
/// annotate such results in the UI without ever showing a blank or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationResult {
    pub text: String,
    pub source: ProviderTag,
    pub degraded: bool,
}

/// Best-effort medicine explanations with multi-provider fallback.
///
/// Holds no mutable state and no reference to the patient roster; concurrent
/// resolutions with different inputs are fully independent. At most one
/// outbound call is made per tier per request, with no in-tier retries.
pub struct MedicineExplanationResolver {
    providers: Vec<Box<dyn ExplanationProvider>>,
}

impl MedicineExplanationResolver {
    /// Build the chain from configuration. Tiers without a credential are
    /// left out of the chain entirely.
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        Ok(Self {
            providers: providers::from_config(config)?,
        })
    }

    /// Build the chain from explicit providers, in invocation order.
    pub fn with_providers(providers: Vec<Box<dyn ExplanationProvider>>) -> Self {
        Self { providers }
    }

    /// Prompt sent to every live tier.
    pub fn prompt_for(medicine: &str) -> String {
        format!("Explain {medicine} in 2 short sentences for a patient.")
    }

    /// Resolve an explanation for a medicine name.
    ///
    /// Any per-tier failure (transport error, non-2xx, malformed body, empty
    /// text, timeout) is logged and absorbed; the chain moves on. With all
    /// live tiers exhausted or disabled the offline tier answers, so every
    /// call returns usable text.
    pub async fn resolve(&self, request: &ExplanationRequest) -> ExplanationResult {
        let prompt = Self::prompt_for(&request.medicine);

        for provider in &self.providers {
            debug!(provider = provider.name(), "attempting explanation");
            match provider.try_explain(&prompt).await {
                Ok(text) => {
                    return ExplanationResult {
                        text: trim_to_last_sentence(text.trim()),
                        source: provider.tag(),
                        degraded: false,
                    };
                }
                Err(err) => {
                    warn!(
                        provider = provider.name(),
                        error = %err,
                        "provider failed, falling through to next tier"
                    );
                }
            }
        }

        info!(
            medicine = %request.medicine,
            "no live provider succeeded, serving degraded explanation"
        );
        let text = match offline::lookup(&request.medicine) {
            Some(sentence) => sentence.to_string(),
            None => offline::generic_fallback(&request.medicine),
        };
        ExplanationResult {
            text,
            source: ProviderTag::Offline,
            degraded: true,
        }
    }
}

/// Trim a generation to its last complete sentence so a token-capped cut-off
/// is never shown mid-word. Text without any terminal punctuation is kept
/// unmodified rather than discarded.
fn trim_to_last_sentence(text: &str) -> String {
    match text.rfind(['.', '!', '?']) {
        Some(idx) => text[..=idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::ProviderError;

    /// Scripted tier for chain tests: answers or fails, and counts calls.
    struct StubProvider {
        tag: ProviderTag,
        reply: Option<String>,
        calls: Arc<AtomicU32>,
    }

    impl StubProvider {
        fn new(tag: ProviderTag, reply: Option<&str>) -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            (
                Self {
                    tag,
                    reply: reply.map(String::from),
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl ExplanationProvider for StubProvider {
        fn tag(&self) -> ProviderTag {
            self.tag
        }

        fn name(&self) -> &str {
            "stub"
        }

        async fn try_explain(&self, _prompt: &str) -> std::result::Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(ProviderError::EmptyResponse),
            }
        }
    }

    #[test]
    fn test_primary_success_skips_secondary() {
        let (primary, _) = StubProvider::new(ProviderTag::Primary, Some("Works fine."));
        let (secondary, secondary_calls) = StubProvider::new(ProviderTag::Secondary, Some("Backup."));
        let resolver = MedicineExplanationResolver::with_providers(vec![
            Box::new(primary),
            Box::new(secondary),
        ]);

        let result =
            tokio_test::block_on(resolver.resolve(&ExplanationRequest::new("Paracetamol")));
        assert_eq!(result.source, ProviderTag::Primary);
        assert!(!result.degraded);
        assert_eq!(result.text, "Works fine.");
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fallback_progression_to_secondary() {
        let (primary, primary_calls) = StubProvider::new(ProviderTag::Primary, None);
        let (secondary, _) = StubProvider::new(ProviderTag::Secondary, Some("Backup answer."));
        let resolver = MedicineExplanationResolver::with_providers(vec![
            Box::new(primary),
            Box::new(secondary),
        ]);

        let result = tokio_test::block_on(resolver.resolve(&ExplanationRequest::new("Aspirin")));
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.source, ProviderTag::Secondary);
        assert!(!result.degraded);
    }

    #[test]
    fn test_empty_chain_hits_offline_dictionary() {
        let resolver = MedicineExplanationResolver::with_providers(Vec::new());
        let result =
            tokio_test::block_on(resolver.resolve(&ExplanationRequest::new("Paracetamol 500mg")));
        assert_eq!(result.source, ProviderTag::Offline);
        assert!(result.degraded);
        assert_eq!(
            result.text,
            "Paracetamol is a common painkiller used to treat aches and reduce fever."
        );
    }

    #[test]
    fn test_totality_over_unknown_input() {
        let (primary, _) = StubProvider::new(ProviderTag::Primary, None);
        let resolver = MedicineExplanationResolver::with_providers(vec![Box::new(primary)]);
        let result =
            tokio_test::block_on(resolver.resolve(&ExplanationRequest::new("Xyzamol123")));
        assert!(result.degraded);
        assert!(result.text.contains("Xyzamol123"));
        assert!(!result.text.is_empty());
    }

    #[test]
    fn test_provider_text_is_sentence_trimmed() {
        let (primary, _) = StubProvider::new(
            ProviderTag::Primary,
            Some("Ibuprofen reduces pain. It also low"),
        );
        let resolver = MedicineExplanationResolver::with_providers(vec![Box::new(primary)]);
        let result = tokio_test::block_on(resolver.resolve(&ExplanationRequest::new("Ibuprofen")));
        assert_eq!(result.text, "Ibuprofen reduces pain.");
    }

    #[test]
    fn test_trim_to_last_sentence() {
        assert_eq!(
            trim_to_last_sentence("Ibuprofen reduces pain. It also low"),
            "Ibuprofen reduces pain."
        );
        assert_eq!(trim_to_last_sentence("Take twice daily!"), "Take twice daily!");
        assert_eq!(
            trim_to_last_sentence("no terminal punctuation at all"),
            "no terminal punctuation at all"
        );
        assert_eq!(trim_to_last_sentence("Is it safe? Mostly"), "Is it safe?");
    }

    #[test]
    fn test_prompt_template() {
        assert_eq!(
            MedicineExplanationResolver::prompt_for("Aspirin"),
            "Explain Aspirin in 2 short sentences for a patient."
        );
    }
}
