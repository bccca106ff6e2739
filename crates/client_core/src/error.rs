use thiserror::Error;

/// The single failure kind for remote calls.
///
/// Network failures, non-2xx statuses and malformed response bodies all
/// collapse into this. Callers log it and leave local state untouched; it is
/// never surfaced as a user-visible message and never retried automatically.
#[derive(Debug, Error)]
#[error("remote call failed: {0}")]
pub struct RemoteCallFailure(#[from] reqwest::Error);
