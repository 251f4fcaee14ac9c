//! Pluggable AI backend abstraction
//!
//! Backend-agnostic interface for insight generation.
//!
//! # Architecture
//!
//! - `AiBackend` trait: defines the interface for generation backends
//! - `AiClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (gemini, mock). Default: gemini
//! - `GEMINI_API_KEY` (alias `API_KEY`): credential for the Gemini backend
//! - `GEMINI_MODEL`: Model version (default: gemini-2.5-flash)
//! - `GEMINI_BASE_URL`: API host override (used by tests)

mod gemini;
mod mock;
pub mod parsing;

pub use gemini::{GeminiBackend, DEFAULT_MODEL, DEFAULT_TIMEOUT};
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::error::Result;
use crate::insight::Insight;
use crate::profile::Profile;

/// Trait defining the interface for generation backends
///
/// Backends must be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Generate insight cards for a profile
    ///
    /// One outbound call to the generation service, then cleanup and
    /// parsing. Any service or parse failure comes back as an error; the
    /// caller decides whether to degrade to the fallback set.
    async fn generate_insights(&self, profile: &Profile) -> Result<Vec<Insight>>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AiClient {
    /// Gemini backend (HTTP API)
    Gemini(GeminiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AiClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `gemini` (default): requires GEMINI_API_KEY (or API_KEY)
    /// - `mock`: deterministic backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    /// A missing credential is not an error here: the serving path treats
    /// an absent client as a degraded service and answers from the
    /// fallback set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "gemini" => GeminiBackend::from_env().map(AiClient::Gemini),
            "mock" => Some(AiClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to gemini");
                GeminiBackend::from_env().map(AiClient::Gemini)
            }
        }
    }

    /// Create a Gemini backend directly
    pub fn gemini(base_url: &str, api_key: &str, model: &str) -> Self {
        AiClient::Gemini(GeminiBackend::new(base_url, api_key, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AiClient::Mock(MockBackend::new())
    }
}

// Implement AiBackend for AiClient by delegating to the inner backend
#[async_trait]
impl AiBackend for AiClient {
    async fn generate_insights(&self, profile: &Profile) -> Result<Vec<Insight>> {
        match self {
            AiClient::Gemini(b) => b.generate_insights(profile).await,
            AiClient::Mock(b) => b.generate_insights(profile).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AiClient::Gemini(b) => b.health_check().await,
            AiClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AiClient::Gemini(b) => b.model(),
            AiClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AiClient::Gemini(b) => b.host(),
            AiClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_client_identity() {
        let client = AiClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn mock_health_check() {
        let client = AiClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn mock_generates_insights() {
        let client = AiClient::mock();
        let insights = client
            .generate_insights(&Profile::sample())
            .await
            .unwrap();
        assert!(!insights.is_empty());
    }
}
