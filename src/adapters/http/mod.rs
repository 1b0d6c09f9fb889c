mod handlers;
mod tracing_layer;

use crate::domain::ports::Renderer;
use crate::domain::services::ListingService;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub listing: ListingService,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    pub fn new(listing: ListingService, renderer: Arc<dyn Renderer>) -> Self {
        Self { listing, renderer }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::landing_handler))
        .route("/annuaire", get(handlers::listing_handler))
        .fallback(handlers::not_found_handler)
        .layer(axum::middleware::from_fn(tracing_layer::request_tracing_middleware))
        .with_state(state)
}
