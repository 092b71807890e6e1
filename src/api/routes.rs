//! API route configuration.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::dispatch::Dispatcher;

/// Create the API router over the given dispatcher.
///
/// The literal `list` and `clear` segments take precedence over `{key}`.
pub fn create_router(dispatcher: Dispatcher) -> Router {
    let memory_routes = Router::new()
        .route("/store", post(handlers::store))
        .route("/list", get(handlers::list))
        .route("/clear", delete(handlers::clear))
        .route("/{key}", get(handlers::get).delete(handlers::delete));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/memory", memory_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}
