pub mod cache;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::get;
use axum::Router;
use cacheview_core::api::{CLEAR_CACHE_PATH, OPERATION_PATH, USER_PATH};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use state::AppState;

/// API routes plus the static front-end as fallback
pub fn router(state: Arc<AppState>, static_dir: &str) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let user_route = format!("{}/{{user_id}}", USER_PATH);

    let api_routes = Router::new()
        .route(OPERATION_PATH, get(handlers::operation))
        .route(&user_route, get(handlers::user))
        .route(CLEAR_CACHE_PATH, get(handlers::clear_cache))
        .layer(trace_layer)
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
}
