use super::AppState;
use crate::ui;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Fallback for everything that is not an API call.
///
/// GET and HEAD are served from the document root (`..` segments are
/// rejected by `ServeDir`); any other method is a bare 404.
pub async fn static_files(State(state): State<AppState>, req: Request) -> Response {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return StatusCode::NOT_FOUND.into_response();
    }

    let wants_index = matches!(req.uri().path(), "/" | "/index.html");
    let served = match ServeDir::new(&state.config.server.document_root)
        .oneshot(req)
        .await
    {
        Ok(resp) => resp.into_response(),
        Err(never) => match never {},
    };

    if served.status() == StatusCode::NOT_FOUND && wants_index {
        return ui::dashboard_handler().await.into_response();
    }
    served
}
