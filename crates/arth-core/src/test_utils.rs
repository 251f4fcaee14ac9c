//! Test utilities for arth-core
//!
//! Provides a mock Gemini server that speaks just enough of the
//! `generateContent` REST surface for development and integration tests,
//! including failure modes for exercising the fallback path.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// What the mock server answers on a generation call
#[derive(Clone)]
enum MockReply {
    /// Wrap this text in a well-formed candidates envelope
    Text(String),
    /// Answer with HTTP 500
    ServerError,
}

/// Mock Gemini server for testing and development
pub struct MockGeminiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockGeminiServer {
    /// Start a server whose generation calls return a valid insight array
    pub async fn start() -> Self {
        Self::start_with_reply(MockReply::Text(default_insights_json())).await
    }

    /// Start a server whose generation calls return the given raw text
    ///
    /// The text lands verbatim in `candidates[0].content.parts[0].text`, so
    /// tests can exercise fenced, truncated, or otherwise malformed output.
    pub async fn start_with_response(text: &str) -> Self {
        Self::start_with_reply(MockReply::Text(text.to_string())).await
    }

    /// Start a server whose generation calls fail with HTTP 500
    pub async fn start_failing() -> Self {
        Self::start_with_reply(MockReply::ServerError).await
    }

    async fn start_with_reply(reply: MockReply) -> Self {
        let state = Arc::new(reply);
        let app = Router::new()
            .route("/v1beta/models", get(handle_list_models))
            .route("/v1beta/models/:model", post(handle_generate))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockGeminiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Models list endpoint (health check)
async fn handle_list_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: vec![ModelInfo {
            name: "models/gemini-2.5-flash".to_string(),
        }],
    })
}

/// generateContent endpoint
async fn handle_generate(
    State(reply): State<Arc<MockReply>>,
    Json(_request): Json<GenerateRequest>,
) -> axum::response::Response {
    match reply.as_ref() {
        MockReply::Text(text) => Json(GenerateResponse {
            candidates: vec![CandidateOut {
                content: ContentOut {
                    role: "model".to_string(),
                    parts: vec![PartOut { text: text.clone() }],
                },
            }],
        })
        .into_response(),
        MockReply::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "mock backend down").into_response()
        }
    }
}

/// A well-formed six-card response, fenced the way the live model wraps it
fn default_insights_json() -> String {
    let cards = serde_json::json!([
        {"title": "Goal SIP Requirement", "description": "Invest about ₹75,000 monthly.",
         "type": "info", "category": "Goal", "impact": "High"},
        {"title": "Tax Saving", "description": "Exhaust the 80C limit via ELSS or PPF.",
         "type": "suggestion", "category": "Tax", "impact": "Medium"},
        {"title": "Emergency Fund", "description": "Hold ₹2.7L in a liquid fund.",
         "type": "warning", "category": "Savings", "impact": "High"},
        {"title": "Debt-to-Income", "description": "Debt is 8% of income, comfortable.",
         "type": "positive", "category": "Debt", "impact": "Low"},
        {"title": "Asset Allocation", "description": "60/40 equity-debt suits Medium risk.",
         "type": "suggestion", "category": "Investment", "impact": "Medium"},
        {"title": "Savings Rate", "description": "You save 70% of income each month.",
         "type": "positive", "category": "Savings", "impact": "Low"}
    ]);
    format!("```json\n{}\n```", cards)
}

// Request/Response types for the mock server

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[allow(dead_code)]
    contents: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    candidates: Vec<CandidateOut>,
}

#[derive(Debug, Serialize)]
struct CandidateOut {
    content: ContentOut,
}

#[derive(Debug, Serialize)]
struct ContentOut {
    role: String,
    parts: Vec<PartOut>,
}

#[derive(Debug, Serialize)]
struct PartOut {
    text: String,
}

#[derive(Debug, Serialize)]
struct ModelsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    name: String,
}
