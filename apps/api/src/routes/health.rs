use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

/// GET /
/// Also answers every unmatched path. OPTIONS is a CORS preflight and gets 204.
pub async fn health_handler(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    (StatusCode::OK, "OK").into_response()
}
