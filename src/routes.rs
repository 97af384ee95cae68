use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;
use crate::translate::{TranslationRequest, TranslationResult};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/translate", post(translate))
        .route("/api/languages", get(get_languages))
        .route("/api/health", get(health_check))
}

/// Full application: routes, CORS for browser clients, request tracing
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> Json<TranslationResult> {
    Json(state.orchestrator.handle(&request).await)
}

async fn get_languages(State(state): State<AppState>) -> Json<Value> {
    let languages = state.orchestrator.invoker().languages();
    Json(json!({
        "languages": languages.entries(),
        "default_source_lang": languages.default_source_code(),
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let model_healthy = match state.model.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            warn!("Model service health check failed: {}", e);
            false
        }
    };
    Json(json!({
        "status": "ok",
        "model_service": model_healthy,
        "model": state.config.translation_config.model_name,
        "started_at": state.started_at.to_rfc3339(),
        "uptime_secs": (Utc::now() - state.started_at).num_seconds(),
    }))
}
