/// Built-in dashboard page
///
/// Served at `/` when the document root does not provide its own
/// `index.html`. Polls `/api/data` and `/api/system` and can trigger a run.
use axum::response::{Html, IntoResponse};

/// Embedded dashboard HTML
pub const DASHBOARD_HTML: &str = include_str!("dashboard.html");

/// Serve the built-in dashboard page
pub async fn dashboard_handler() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}
