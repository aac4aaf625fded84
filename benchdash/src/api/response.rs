use axum::Json;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body with `Access-Control-Allow-Origin: *`, so the dashboard can be
/// hosted on a different origin than the API.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(self.0)).into_response()
    }
}
