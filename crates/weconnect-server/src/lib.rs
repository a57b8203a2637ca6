//! weconnect-server: HTTP tool and resource registry.
//!
//! The protocol surface consumed by agent clients: a tool registry
//! (`GET /tools`, `POST /tools/{name}`), a read-only resource tree
//! under `/vehicles`, and guided workflow prompts under `/prompts`.
//! All results are JSON values; adapter failures are reported inside
//! the value, never as HTTP errors.
//!
//! # Usage
//!
//! ```ignore
//! use weconnect_server::{create_router, AppState};
//!
//! let state = AppState::starting(api_key);
//! let router = create_router(state.clone());
//! // background task connects the real adapter, then:
//! // state.swap_adapter(Arc::new(adapter)).await;
//! ```

pub mod auth;
pub mod prompts;
pub mod resources;
pub mod state;
pub mod tools;

pub use state::AppState;

use axum::Router;
use axum::extract::State;
use axum::middleware;
use axum::response::Json;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

async fn health(State(state): State<AppState>) -> Json<Value> {
    let ready = state.adapter().await.is_ready();
    Json(json!({
        "status": "ok",
        "service": "weconnect-mcp",
        "ready": ready,
    }))
}

/// Build the full router with tracing, CORS, and optional auth.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        // Tool registry
        .route("/tools", get(tools::list_tools))
        .route("/tools/{name}", post(tools::call_tool))
        // Prompt registry
        .route("/prompts", get(prompts::list_prompts))
        .route("/prompts/{name}", get(prompts::get_prompt))
        // Resource tree
        .route("/vehicles", get(resources::list_vehicles))
        .route("/vehicles/{id}/info", get(resources::vehicle_info))
        .route("/vehicles/{id}/state", get(resources::vehicle_state))
        .route("/vehicles/{id}/doors", get(resources::doors))
        .route("/vehicles/{id}/windows", get(resources::windows))
        .route("/vehicles/{id}/tyres", get(resources::tyres))
        .route("/vehicles/{id}/lights", get(resources::lights))
        .route("/vehicles/{id}/type", get(resources::vehicle_type))
        .route("/vehicles/{id}/battery", get(resources::battery))
        .route("/vehicles/{id}/charging", get(resources::charging))
        .route("/vehicles/{id}/range", get(resources::range))
        .route("/vehicles/{id}/climate", get(resources::climate))
        .route(
            "/vehicles/{id}/window-heating",
            get(resources::window_heating),
        )
        .route("/vehicles/{id}/position", get(resources::position))
        .route("/vehicles/{id}/maintenance", get(resources::maintenance))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
