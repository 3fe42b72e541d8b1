use thiserror::Error;

/// Failure of a single provider attempt.
///
/// These never cross the resolver boundary: the fallback chain logs the
/// failure and moves on to the next tier. A missing credential is not
/// represented here — a provider without a credential is never constructed.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {code}")]
    Status { code: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("provider returned empty text")]
    EmptyResponse,
}

/// Crate-level error for the fallible surfaces outside the resolver
/// (construction and the triage store). Resolution itself is total and
/// produces no errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("patient already holds active token {token}")]
    DuplicateRegistration { token: String },

    #[error("no patient registered under token {0}")]
    UnknownToken(String),

    #[error("appointment {0} was already completed")]
    AlreadyCompleted(String),
}
