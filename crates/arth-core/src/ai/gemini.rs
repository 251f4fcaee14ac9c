//! Gemini backend implementation
//!
//! HTTP client for the Gemini `generateContent` REST API. The service is
//! text-in/text-out with no schema enforcement; all structural guarantees
//! are imposed by the parsing step afterwards.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::insight::Insight;
use crate::profile::Profile;
use crate::prompt::render_insight_prompt;

use super::parsing::parse_insights;
use super::AiBackend;

/// Default model version for insight generation
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Upper bound on a single generation call. A hung upstream call must not
/// hang the request handler; expiry surfaces as a service failure and the
/// caller degrades to the fallback set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini backend
///
/// The API key is read from the environment at construction and only ever
/// sent as a query parameter to the Gemini host; it is never logged.
#[derive(Clone)]
pub struct GeminiBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GeminiBackend {
    /// Create a new Gemini backend
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout (used by tests with a local mock)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create from environment variables
    ///
    /// Reads `GEMINI_API_KEY` (or the legacy `API_KEY` alias), and
    /// optionally `GEMINI_MODEL` and `GEMINI_BASE_URL`. Returns `None`
    /// without a key: credential problems stay lazily discovered and the
    /// serving path degrades to the fallback instead of failing startup.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.is_empty())?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Some(Self::new(&base_url, &api_key, &model))
    }
}

/// Request to the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Response from the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl AiBackend for GeminiBackend {
    async fn generate_insights(&self, profile: &Profile) -> Result<Vec<Insight>> {
        let prompt = render_insight_prompt(profile);

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Backend(format!(
                "Gemini returned {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .text()
            .ok_or_else(|| Error::Backend("Gemini response contained no candidates".into()))?;

        debug!("Gemini insight response: {}", text);

        parse_insights(&text)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/v1beta/models", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .timeout(Duration::from_secs(10))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
