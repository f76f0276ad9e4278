//! Migraine Risk Provider Backend
//!
//! Development backend for the Migraine Risk client.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 MIGRAINE RISK CLOUD                   │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────┐  ┌─────────────┐  │
//! │  │  API       │   │  Risk feed   │  │ Push token  │  │
//! │  │  (Axum)    │──▶│  (rotation)  │  │ registry    │  │
//! │  └────────────┘   └──────────────┘  └─────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;
mod store;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;
use std::sync::Arc;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "migraine_cloud=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Migraine Risk backend starting ({})...", config.environment);
    if config.is_production() {
        tracing::warn!("Serving the demo risk rotation in production");
    }

    let state = AppState {
        config: config.clone(),
        feed: Arc::new(store::RiskFeed::demo()),
        tokens: Arc::new(store::TokenStore::new()),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub feed: Arc<store::RiskFeed>,
    pub tokens: Arc<store::TokenStore>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/latest", get(handlers::risk::latest))
        .route("/api/v1/register-token", post(handlers::tokens::register))
        // Legacy path used by older app builds
        .route("/api/register-token", post(handlers::tokens::register))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            config: config::Config::default(),
            feed: Arc::new(store::RiskFeed::demo()),
            tokens: Arc::new(store::TokenStore::new()),
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(create_router(test_state()), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["environment"], "development");
        assert_eq!(body["registered_tokens"], 0);
    }

    #[tokio::test]
    async fn test_latest_rotates() {
        let state = test_state();

        let (status, first) = send(create_router(state.clone()), get_req("/api/v1/latest")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["p_next_hour"], 0.18);
        assert_eq!(first["top_factors"][0]["feature"], "hrv");
        assert_eq!(first["top_factors"][0]["direction"], "down");

        let (_, second) = send(create_router(state), get_req("/api/v1/latest")).await;
        assert_eq!(second["p_next_hour"], 0.46);
        assert!(second["recommended_actions"].is_array());
    }

    #[tokio::test]
    async fn test_empty_feed_is_500() {
        let state = AppState {
            feed: Arc::new(store::RiskFeed::new(vec![])),
            ..test_state()
        };
        let (status, body) = send(create_router(state), get_req("/api/v1/latest")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn test_register_token() {
        let state = test_state();
        let req = post_json(
            "/api/v1/register-token",
            json!({"user_id": "YZMM", "fcm_token": "ExponentPushToken[abc]"}),
        );
        let (status, body) = send(create_router(state.clone()), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["registered"], true);
        assert_eq!(body["created"], true);
        assert_eq!(state.tokens.count().await, 1);
    }

    #[tokio::test]
    async fn test_legacy_path_and_expo_alias_are_idempotent() {
        let state = test_state();
        let first = post_json(
            "/api/v1/register-token",
            json!({"user_id": "YZMM", "fcm_token": "tok"}),
        );
        let (_, first) = send(create_router(state.clone()), first).await;

        let second = post_json(
            "/api/register-token",
            json!({"user_id": "YZMM", "expoPushToken": "tok"}),
        );
        let (status, second) = send(create_router(state.clone()), second).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["created"], false);
        assert_eq!(second["registration_id"], first["registration_id"]);
        assert_eq!(state.tokens.count().await, 1);
    }

    #[tokio::test]
    async fn test_blank_token_rejected() {
        let req = post_json("/api/v1/register-token", json!({"user_id": "YZMM", "fcm_token": ""}));
        let (status, body) = send(create_router(test_state()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);

        let req = post_json("/api/v1/register-token", json!({"fcm_token": "   "}));
        let (status, _) = send(create_router(test_state()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_or_unparsable_token_body_is_400() {
        let req = post_json("/api/v1/register-token", json!({"user_id": "YZMM"}));
        let (status, body) = send(create_router(test_state()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["error"].as_str().unwrap().contains("fcm_token"));

        let req = Request::builder()
            .method("POST")
            .uri("/api/register-token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(create_router(test_state()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send(create_router(test_state()), get_req("/api/v2/latest")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "route /api/v2/latest not found");
    }
}
