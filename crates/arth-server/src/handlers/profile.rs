//! Profile handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::AppState;
use arth_core::Profile;

/// GET /api/user-data - Return the current user's financial profile
///
/// The profile is process-wide constant state: every call returns the same
/// value for the process lifetime.
pub async fn get_user_data(State(state): State<Arc<AppState>>) -> Json<Profile> {
    Json(state.profile.clone())
}
