pub mod items;
pub mod suppliers;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(items::routes())
        .merge(suppliers::routes())
}

/// Full application: resource routes, service probes and HTTP middleware.
pub fn create_app(state: AppState) -> Router {
    create_router()
        .route("/", get(|| async { "Inventory API" }))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
