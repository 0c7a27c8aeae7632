//! HTTP router
//!
//! Mounts the five pages and a health check on one axum router.

use crate::app::AppState;
use crate::pages::{explore, home, memo_detail, tag, user};
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Pages
        .route("/", get(home::home))
        .route("/explore", get(explore::explore))
        .route("/m/{id}", get(memo_detail::memo_detail))
        .route("/tag/{name}", get(tag::tag))
        .route("/user/{id}", get(user::user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
