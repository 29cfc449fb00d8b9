//! HTTP surface over the converter

pub mod handlers;
pub mod response;

use crate::core::Converter;
use axum::{
    Router,
    routing::{get, post},
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<Converter>,
}

impl AppState {
    pub fn new(converter: Converter) -> Self {
        Self {
            converter: Arc::new(converter),
        }
    }
}

/// API routes only, without CORS or static files.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/currencies", get(handlers::list_currencies))
        .route("/api/convert", post(handlers::convert))
        .route("/api/rate/:from/:to", get(handlers::rate))
        .with_state(state)
}

/// The full application: API routes with permissive CORS, falling back to
/// `static_dir` (or a JSON 404) for every other path.
pub fn build_app(state: AppState, static_dir: Option<&Path>) -> Router {
    let app = api_router(state);
    let app = match static_dir {
        Some(dir) => {
            info!(static_dir = %dir.display(), "Serving static files");
            app.fallback_service(ServeDir::new(dir))
        }
        None => app.fallback(handlers::not_found),
    };

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
