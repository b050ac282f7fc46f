//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default, preflights only
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tower::{Layer, ServiceExt};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::BlogStore;
use crate::pages::PageSettings;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    pub pages: PageSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
            pages: PageSettings::default(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogStore>,
    pub pages: PageSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn BlogStore>, pages: PageSettings) -> Self {
        Self { store, pages }
    }
}

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    let cors = if cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://localhost:3030"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
                HeaderValue::from_static("http://127.0.0.1:3030"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::health::router())
        .merge(routes::posts::router())
        .merge(routes::pages::router())
        .fallback(routes::pages::not_found)
        .layer(middleware::from_fn_with_state(cors, cors_unless_plain_options))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Apply CORS to every request except an `OPTIONS` without
/// `Access-Control-Request-Method`. `CorsLayer` answers any `OPTIONS` as a
/// preflight, so a plain one would never reach the route's method handling.
async fn cors_unless_plain_options(
    State(cors): State<CorsLayer>,
    request: Request,
    next: Next,
) -> Response {
    let plain_options = request.method() == Method::OPTIONS
        && !request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

    if plain_options {
        return next.run(request).await;
    }

    match cors.layer(next).oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    }
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// The caller owns the store and is responsible for closing it afterwards.
///
/// # Example
///
/// ```ignore
/// let store: Arc<dyn BlogStore> = Arc::new(PgStore::connect(&url, 5).await?);
/// run_server(store.clone(), ServerConfig::default()).await?;
/// store.close().await;
/// ```
pub async fn run_server(
    store: Arc<dyn BlogStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let state = AppState::new(store, config.pages.clone());
    let app = build_router(state, config.cors_permissive);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3030);
        assert!(!config.cors_permissive);
    }

    #[tokio::test]
    async fn unknown_route_is_404_page() {
        let state = AppState::new(Arc::new(MemoryStore::new()), PageSettings::default());
        let app = build_router(state, false);

        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn cors_allows_localhost_origin() {
        let state = AppState::new(Arc::new(MemoryStore::new()), PageSettings::default());
        let app = build_router(state, false);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn plain_options_reaches_method_handling() {
        let state = AppState::new(Arc::new(MemoryStore::new()), PageSettings::default());
        let app = build_router(state, false);

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/posts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["allow"], "POST, GET");
    }

    #[tokio::test]
    async fn head_on_posts_is_405() {
        let state = AppState::new(Arc::new(MemoryStore::new()), PageSettings::default());
        let app = build_router(state, false);

        let response = app
            .oneshot(
                Request::builder()
                    .method("HEAD")
                    .uri("/api/posts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["allow"], "POST, GET");
    }

    #[tokio::test]
    async fn preflight_is_answered_by_cors() {
        let state = AppState::new(Arc::new(MemoryStore::new()), PageSettings::default());
        let app = build_router(state, false);

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/posts")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }
}
