//! # rxplain
//!
//! Prescription-explanation core of the Pravega hospital front desk. When a
//! doctor completes an appointment, the prescribed medicine name is resolved
//! into a short plain-language explanation through an ordered chain of AI
//! providers, degrading deterministically when nothing live is reachable.
//!
//! ## Core guarantees
//!
//! - **Total**: [`MedicineExplanationResolver::resolve`] always returns
//!   non-empty text and never surfaces an error to the caller.
//! - **Ordered**: live tiers are tried strictly in sequence; a later tier is
//!   only invoked after the earlier one has fully failed. No in-tier retries,
//!   at most one outbound call per tier per request.
//! - **Deterministic floor**: with every live tier disabled or failing, a
//!   fixed dictionary (then a generic message) answers, flagged `degraded`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rxplain::{ExplanationRequest, MedicineExplanationResolver, ResolverConfig};
//!
//! #[tokio::main]
//! async fn main() -> rxplain::Result<()> {
//!     let config = ResolverConfig::from_env();
//!     let resolver = MedicineExplanationResolver::new(&config)?;
//!
//!     let result = resolver
//!         .resolve(&ExplanationRequest::new("Paracetamol 500mg"))
//!         .await;
//!     println!("[{}] {}", result.source, result.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`resolver`] | Ordered fallback chain and result types |
//! | [`providers`] | Provider trait and the Gemini / Hugging Face drivers |
//! | [`offline`] | Deterministic offline dictionary and generic floor |
//! | [`config`] | Startup configuration, credentials read once |
//! | [`transport`] | Shared JSON-over-HTTP client |
//! | [`triage`] | Intake routing, queue tokens, and the patient roster |

pub mod config;
pub mod offline;
pub mod providers;
pub mod resolver;
pub mod transport;
pub mod triage;

pub mod error;
pub use error::{Error, ProviderError};

/// Result type alias for the crate's fallible surfaces.
pub type Result<T> = std::result::Result<T, Error>;

// Re-export main types for convenience
pub use config::ResolverConfig;
pub use providers::{ExplanationProvider, ProviderTag};
pub use resolver::{ExplanationRequest, ExplanationResult, MedicineExplanationResolver};
pub use triage::{
    Department, InMemoryRoster, Intake, PatientRecord, Prescription, Roster, RosterStats, Status,
};
