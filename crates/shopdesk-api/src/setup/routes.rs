//! Route configuration and setup

use crate::constants::{API_PREFIX, HTTP_CONCURRENCY_LIMIT, MULTIPART_OVERHEAD_BYTES};
use crate::error::set_hide_error_details;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use shopdesk_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    set_hide_error_details(config.is_production());

    let app = page_routes()
        .merge(api_routes())
        .route("/health", get(handlers::health::health_check))
        .fallback(handlers::pages::not_found)
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        // The multipart extractor's own 2 MB default is replaced by the configured limit
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(request_body_limit(
            config.max_file_size_bytes(),
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Whole-request limit: one image plus the text fields and multipart framing
fn request_body_limit(max_file_size: usize) -> usize {
    max_file_size.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

/// Dashboard pages
fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::pages::overview))
        .route("/reviews", get(handlers::pages::reviews))
        .route("/surveys", get(handlers::pages::surveys))
        .route("/products", get(handlers::pages::products))
        .route("/products/new", get(handlers::pages::add_product))
        .route("/package-inserts", get(handlers::pages::package_inserts))
}

/// JSON API routes
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/products", API_PREFIX),
        post(handlers::products::create_product),
    )
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_limit_saturates() {
        assert_eq!(request_body_limit(1024), 1024 + MULTIPART_OVERHEAD_BYTES);
        assert_eq!(request_body_limit(usize::MAX), usize::MAX);
    }
}
