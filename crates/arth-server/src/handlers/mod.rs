//! Request handlers

mod health;
mod insights;
mod profile;

pub use health::get_health;
pub use insights::generate_insights;
pub use profile::get_user_data;

use axum::response::Html;

/// GET / - Serve the dashboard page
///
/// The page is embedded in the binary; extra assets can be served from a
/// `--static-dir` fallback.
pub async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../assets/dashboard.html"))
}
