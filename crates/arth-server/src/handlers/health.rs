//! Health handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use arth_core::ai::AiBackend;

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai: AiStatus,
}

/// AI backend portion of the health probe
#[derive(Debug, Serialize)]
pub struct AiStatus {
    pub configured: bool,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// GET /api/health - Service and AI backend status
///
/// The service itself is always "ok" (an unhealthy AI backend only degrades
/// insight quality, it never takes the service down).
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ai = match state.ai {
        Some(ref client) => AiStatus {
            configured: true,
            healthy: client.health_check().await,
            model: Some(client.model().to_string()),
            host: Some(client.host().to_string()),
        },
        None => AiStatus {
            configured: false,
            healthy: false,
            model: None,
            host: None,
        },
    };

    Json(HealthResponse { status: "ok", ai })
}
