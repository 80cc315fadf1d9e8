// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{analyze_handler, health_handler, metrics_handler};
use super::middleware::{request_id_layers, track_metrics};
use crate::analysis::Analyzer;
use crate::config::AppConfig;
use axum::extract::DefaultBodyLimit;
use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analyzer: Analyzer,
}

pub fn create_router(config: AppConfig, analyzer: Analyzer) -> Router {
    let body_limit = config.server.max_body_bytes;
    let state = AppState {
        config: Arc::new(config),
        analyzer,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/v1/analyze", post(analyze_handler))
        .route_layer(middleware::from_fn(track_metrics))
        // Images arrive base64-encoded inside the JSON body
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        // Browser front-ends call the API cross-origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
