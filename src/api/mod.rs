pub mod auth;
mod error;
mod sweets;
mod validation;

pub use error::{ApiError, ErrorCode};

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Catalog routes; mutations require a bearer token via the User extractor
    let sweet_routes = Router::new()
        .route("/", post(sweets::create_sweet))
        .route("/", get(sweets::list_sweets))
        .route("/search", get(sweets::search_sweets))
        .route("/:id", get(sweets::get_sweet))
        .route("/:id", put(sweets::update_sweet))
        .route("/:id", delete(sweets::delete_sweet))
        .route("/:id/purchase", post(sweets::purchase_sweet))
        .route("/:id/restock", post(sweets::restock_sweet));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api/sweets", sweet_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to Sweet Shop API" }))
}

async fn health_check() -> &'static str {
    "OK"
}
