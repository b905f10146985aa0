use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use crate::controllers::stop_controller::StopController;
use crate::dto::collection_dto::CollectionSubmittedResponse;
use crate::dto::stop_dto::{StopListQuery, StopResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Driver endpoints, paths kept exactly as the handheld app calls them
pub fn create_stop_router() -> Router<AppState> {
    Router::new()
        .route("/api/stops/", get(list_today_stops))
        .route("/api/today-stops/", get(list_today_stops))
        .route("/api/stops/:id/", get(get_stop))
        .route("/api/stops/:id/collection/", post(submit_collection))
        .route("/api/stops/:id/submit-collection/", post(submit_collection))
        .route("/api/stops/:id/failure/", post(report_failure))
}

async fn list_today_stops(
    State(state): State<AppState>,
    Query(query): Query<StopListQuery>,
) -> Result<Json<Vec<StopResponse>>, AppError> {
    let controller = StopController::new(state.pool.clone());
    let today = Utc::now().date_naive();
    let stops = controller.list_for_vehicle(query.vehicle_id.as_deref(), today).await?;
    Ok(Json(stops))
}

async fn get_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StopResponse>, AppError> {
    let controller = StopController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

// Raw bytes so a missing or completed stop is a 404 whatever the body holds
async fn submit_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<(StatusCode, Json<CollectionSubmittedResponse>), AppError> {
    let controller = StopController::new(state.pool.clone());
    let response = controller.submit_collection(id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn report_failure(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<StopResponse>, AppError> {
    let controller = StopController::new(state.pool.clone());
    Ok(Json(controller.report_failure(id, &body).await?))
}
