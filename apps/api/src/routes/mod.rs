pub mod generate;
pub mod health;

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, DefaultBodyLimit},
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
    routing::{any, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{info, info_span, Span};

use crate::state::AppState;
use crate::upload::MAX_BODY_BYTES;

/// OPTIONS /generate
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(health::health_handler))
        .route(
            "/generate",
            post(generate::handle_generate)
                .options(preflight)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .fallback(health::health_handler)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(log_response),
        )
        // Permissive CORS headers, set on every response including errors.
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::VARY,
                    HeaderValue::from_static("Origin"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("POST, OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type"),
                )),
        )
}

fn request_span(request: &Request<Body>) -> Span {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    info_span!(
        "request",
        %remote,
        method = %request.method(),
        path = %request.uri().path()
    )
}

fn log_response(response: &Response, latency: Duration, _span: &Span) {
    info!(
        status = response.status().as_u16(),
        elapsed_ms = latency.as_millis() as u64,
        "request completed"
    );
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::Path;

    use axum::http::Method;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::GeminiClient;

    pub const TEST_MODEL: &str = "gemini-test";

    pub fn test_state(api_key: Option<&str>, upstream: &str, staging_dir: &Path) -> AppState {
        let config = Config {
            gemini_api_key: api_key.map(String::from),
            gemini_model: TEST_MODEL.to_string(),
            gemini_api_base: upstream.to_string(),
            staging_dir: staging_dir.to_path_buf(),
            port: 0,
            rust_log: "debug".to_string(),
        };
        AppState {
            llm: GeminiClient::new(&config.gemini_api_base, &config.gemini_model).unwrap(),
            config,
        }
    }

    pub async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn app() -> (Router, tempfile::TempDir) {
        let staging = tempfile::tempdir().unwrap();
        let router = build_router(test_state(Some("k"), "http://127.0.0.1:9", staging.path()));
        (router, staging)
    }

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::VARY], "Origin");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let (app, _staging) = app();
        let response = app.oneshot(request(Method::GET, "/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn test_health_preflight_is_no_content() {
        let (app, _staging) = app();
        let response = app.oneshot(request(Method::OPTIONS, "/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_cors(&response);
    }

    #[tokio::test]
    async fn test_unmatched_path_is_health() {
        let (app, _staging) = app();
        let response = app
            .oneshot(request(Method::GET, "/some/other/path"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn test_generate_preflight_is_no_content() {
        let (app, _staging) = app();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/generate")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_cors(&response);
    }

    #[tokio::test]
    async fn test_generate_rejects_get() {
        let (app, _staging) = app();
        let response = app
            .oneshot(request(Method::GET, "/generate"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_cors(&response);
        assert_eq!(body_string(response).await, "Method Not Allowed");
    }
}
