use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::language::{LanguageOption, LanguagePair};
use crate::proxy;
use crate::state::AppState;
use crate::websocket;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // WebSocket view sessions
        .route("/client-ws", get(websocket::websocket_handler))
        // Health check
        .route("/api/health", get(health_check))
        // Selector options
        .route("/api/language-pairs", get(language_pairs))
        // Proxy endpoint
        .route("/api/huggingface", post(proxy::translate_handler))
}

/// Full application with middleware and state applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "active_sessions": state.sessions.len(),
        "translator_endpoint": state.config.client_endpoint()
    }))
}

async fn language_pairs() -> Json<Vec<LanguageOption>> {
    Json(LanguagePair::options())
}
