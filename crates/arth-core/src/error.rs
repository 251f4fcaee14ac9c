//! Error types for Arth
//!
//! Failure kinds are kept as distinct variants so callers can route them
//! differently: `Http`/`Backend`/`MissingCredential` are service failures,
//! `Json`/`InvalidData` are parse failures. Both families degrade to the
//! fallback insight set; input-shape problems never reach this enum (they
//! are rejected at the HTTP boundary).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("AI backend error: {0}")]
    Backend(String),

    #[error("AI credential not configured (set GEMINI_API_KEY)")]
    MissingCredential,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error came from the external service rather than from
    /// parsing its output. Used only for diagnostics; both kinds are
    /// recovered with the fallback set.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Backend(_) | Error::MissingCredential
        )
    }
}
