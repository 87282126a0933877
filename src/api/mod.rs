use axum::http::HeaderValue;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::orchestrator::LeadFinder;

pub mod handlers;
pub mod models;

pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    // credentials rule out wildcards, so mirror the request instead
    let allow_origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(parse_origins(allowed_origins))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

fn parse_origins(allowed_origins: &[String]) -> Vec<HeaderValue> {
    allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect()
}

pub fn create_router(lead_finder: Arc<LeadFinder>, config: &Config) -> Router {
    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/api/search", get(handlers::search_handler))
        .with_state(lead_finder)
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
