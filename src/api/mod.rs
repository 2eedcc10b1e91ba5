//! dashkit HTTP server
//!
//! HTML pages and JSON API, built with Axum.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - Selected page (`page`, `theme`, `show_code` query params)
//! - `POST /demo/form` - Demo form submission (urlencoded)
//! - `POST /demo/upload` - CSV upload (multipart, field `file`)
//!
//! ## JSON
//! - `GET /api/v1/views/:page` - View instructions of a page
//! - `GET /api/v1/sample-data` - Sample table (`format=json|csv`, `seed`)
//! - `POST /api/v1/summarize` - CSV body to head rows and statistics
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use dashkit::api::{serve, AppState};
//! use dashkit::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, _) = Config::load_default();
//!     let state = AppState::new(config);
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;

pub use error::{ApiError, ApiResult, PageError, PageResult};
pub use session::{Session, SESSION_COOKIE};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, Uri},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.server.max_upload_bytes;
    let cors = cors_layer(&state.config.server.cors_origins);

    let page_routes = Router::new()
        .route("/", get(routes::pages::index))
        .route("/demo/form", post(routes::pages::submit_form))
        .route("/demo/upload", post(routes::pages::upload_file));

    let api_routes = Router::new()
        .route("/views/:page", get(routes::data::get_view))
        .route("/sample-data", get(routes::data::sample_data))
        .route("/summarize", post(routes::data::summarize_csv))
        .layer(cors);

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .merge(page_routes)
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// CORS for the JSON API. `"*"` allows any origin; no entries means
/// same-origin only.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Start the server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.server.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("dashkit listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("dashkit shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    const BOUNDARY: &str = "dashkit-test-boundary";

    fn create_test_app() -> Router {
        let mut config = Config::default();
        config.sample.seed = Some(7);
        build_router(AppState::new(config))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: text/csv\r\n\r\n",
                    name, filename
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        body
    }

    async fn upload(parts: &[(&str, Option<&str>, &str)]) -> Response {
        create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/demo/upload")
                    .header(
                        "Content-Type",
                        format!("multipart/form-data; boundary={}", BOUNDARY),
                    )
                    .body(Body::from(multipart_body(parts)))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = get(create_test_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["cache"]["capacity"], 64);
    }

    #[tokio::test]
    async fn test_every_page_renders() {
        let cases = [
            ("home", "Features"),
            ("data-visualization", "Data Visualization Examples"),
            ("interactive-demo", "Interactive Demo"),
            ("about", "About This Application"),
        ];

        for (slug, marker) in cases {
            let response = get(create_test_app(), &format!("/?page={}", slug)).await;
            assert_eq!(response.status(), StatusCode::OK, "page {}", slug);

            let html = body_text(response).await;
            assert!(html.contains(marker), "page {} lacks {}", slug, marker);
            assert!(html.contains("Made with ❤️ using Rust"));
        }
    }

    #[tokio::test]
    async fn test_first_visit_sets_session_cookie() {
        let response = get(create_test_app(), "/").await;
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("dashkit_session="));
    }

    #[tokio::test]
    async fn test_unknown_page_is_rejected() {
        let response = get(create_test_app(), "/?page=settings").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("Unknown page"));
    }

    #[tokio::test]
    async fn test_error_page_on_first_visit_sets_session_cookie() {
        let response = get(create_test_app(), "/?page=x").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("dashkit_session="));

        let response = upload(&[("theme", None, "dark")]).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().contains_key(header::SET_COOKIE));

        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/?page=x")
                    .header(header::COOKIE, "dashkit_session=abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!response.headers().contains_key(header::SET_COOKIE));
    }

    #[tokio::test]
    async fn test_theme_is_applied() {
        let html = body_text(get(create_test_app(), "/?page=about&theme=dark").await).await;
        assert!(html.contains("theme-dark"));
    }

    #[tokio::test]
    async fn test_form_submission() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/demo/form")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from("theme=light&show_code=false&name=Ada&age=36&submit=Submit"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Thank you Ada! Your information has been submitted."));
        assert!(html.contains("<strong>Name:</strong> Ada"));
    }

    #[tokio::test]
    async fn test_upload_summary() {
        let response = upload(&[
            ("theme", None, "light"),
            ("file", Some("scores.csv"), "name,score\nAda,10\nGrace,20\n"),
        ])
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("File uploaded successfully!"));
        assert!(html.contains("Basic Statistics"));
        assert!(html.contains("15.000000"));
    }

    #[tokio::test]
    async fn test_malformed_upload_is_an_error_page() {
        let response = upload(&[("file", Some("bad.csv"), "a,b\n1,2,3\n")]).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let html = body_text(response).await;
        assert!(html.contains("alert-error"));
        assert!(html.contains("Interactive Demo") || html.contains("Could not read the uploaded file"));

        // The next request is served normally
        let response = get(create_test_app(), "/?page=demo").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let response = upload(&[("theme", None, "dark")]).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("No file uploaded"));
    }

    #[tokio::test]
    async fn test_view_json() {
        let response = get(create_test_app(), "/api/v1/views/about").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["page"], "about");
        assert_eq!(json["nodes"][0]["type"], "header");
    }

    #[tokio::test]
    async fn test_view_json_unknown_page() {
        let response = get(create_test_app(), "/api/v1/views/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert!(json["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_sample_data_csv() {
        let response = get(create_test_app(), "/api/v1/sample-data?format=csv&seed=42").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv"));

        let csv = body_text(response).await;
        assert!(csv.starts_with("date,sales,customers,category"));
        assert_eq!(csv.lines().count(), 367);
    }

    #[tokio::test]
    async fn test_sample_data_is_reproducible_with_seed() {
        let first = body_text(get(create_test_app(), "/api/v1/sample-data?seed=3").await).await;
        let second = body_text(get(create_test_app(), "/api/v1/sample-data?seed=3").await).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_summarize_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/summarize")
                    .header("Content-Type", "text/csv")
                    .body(Body::from("city,temp\nOslo,3\nRome,15\n"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["rows"], 2);
        assert_eq!(json["description"]["kind"], "numeric");
    }

    #[tokio::test]
    async fn test_summarize_empty_body() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/summarize")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = get(create_test_app(), "/nowhere").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
