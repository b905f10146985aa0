use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::database::connection::ping;
use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = if ping(&state.pool).await { "connected" } else { "unavailable" };
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": database,
    }))
}
