//! Insight generation handler

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::{AppError, AppState, INSIGHTS_SOURCE_HEADER};
use arth_core::ai::AiBackend;
use arth_core::{fallback_insights, Insight, Profile};

/// POST /api/insights - Generate insight cards for a profile
///
/// The body is a Profile-shaped payload; malformed or missing required
/// fields are rejected as a client error before the pipeline runs. Service
/// and parse failures on the AI path are recovered locally: the response is
/// still 200 with the fixed fallback set, and the `x-insights-source`
/// header says which path produced the body.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Profile>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(profile) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected malformed insights payload");
        AppError::bad_request(&rejection.body_text())
    })?;

    let (source, insights) = match state.ai {
        Some(ref ai) => match ai.generate_insights(&profile).await {
            Ok(insights) => ("generated", insights),
            Err(e) => {
                warn!(
                    error = %e,
                    service_error = e.is_service_error(),
                    "Insight generation failed, serving fallback"
                );
                ("fallback", fallback_insights())
            }
        },
        None => {
            warn!("AI backend not configured, serving fallback insights");
            ("fallback", fallback_insights())
        }
    };

    Ok(insights_response(source, insights))
}

fn insights_response(source: &'static str, insights: Vec<Insight>) -> Response {
    ([(INSIGHTS_SOURCE_HEADER, source)], Json(insights)).into_response()
}
