//! Car Wash Mixer Server Library
//!
//! HTTP front-end for loudness normalization and lyric bar mapping. Paths in
//! requests refer to the server's own filesystem.
//!
//! This library exposes the router and its parts for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;

/// Build the full application router
pub fn create_router(app_state: AppState, request_timeout: Duration) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/mix", post(api::mix::mix))
        .route("/map-lyrics", post(api::lyrics::map_lyrics));

    Router::new()
        .nest("/api", api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
