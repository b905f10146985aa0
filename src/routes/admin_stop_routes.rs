use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::admin_stop_controller::AdminStopController;
use crate::dto::api_response::ApiResponse;
use crate::dto::stop_dto::{AdminStopResponse, StopFilters, UpdateStopRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_stop_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stops))
        .route("/:id", get(get_stop).put(update_stop).delete(delete_stop))
}

async fn list_stops(
    State(state): State<AppState>,
    Query(filters): Query<StopFilters>,
) -> Result<Json<Vec<AdminStopResponse>>, AppError> {
    let controller = AdminStopController::new(state.pool.clone());
    Ok(Json(controller.list(&filters).await?))
}

async fn get_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AdminStopResponse>, AppError> {
    let controller = AdminStopController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStopRequest>,
) -> Result<Json<AdminStopResponse>, AppError> {
    let controller = AdminStopController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AdminStopController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Stop deleted")))
}
