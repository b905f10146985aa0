use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::controllers::route_controller::RouteController;
use crate::dto::api_response::ApiResponse;
use crate::dto::route_dto::{CreateRouteRequest, RouteDetailResponse, RouteFilters, RouteResponse, UpdateRouteRequest};
use crate::dto::stop_dto::{AdminStopResponse, NewStopRequest, ReorderStopsRequest};
use crate::dto::vehicle_log_dto::{CreateVehicleLogRequest, UpdateVehicleLogRequest, VehicleLogResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route("/:id", get(get_route).put(update_route).delete(delete_route))
        .route("/:id/stops", post(add_stop))
        .route("/:id/stops/order", put(reorder_stops))
        .route("/:id/log", get(get_log).post(create_log).put(update_log))
}

async fn list_routes(
    State(state): State<AppState>,
    Query(filters): Query<RouteFilters>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.list(&filters).await?))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<RouteDetailResponse>), AppError> {
    let controller = RouteController::new(state.pool.clone());
    let route = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(route)))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RouteDetailResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRouteRequest>,
) -> Result<Json<RouteDetailResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Route deleted")))
}

async fn add_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<NewStopRequest>,
) -> Result<(StatusCode, Json<AdminStopResponse>), AppError> {
    let controller = RouteController::new(state.pool.clone());
    let stop = controller.add_stop(id, request).await?;
    Ok((StatusCode::CREATED, Json(stop)))
}

async fn reorder_stops(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ReorderStopsRequest>,
) -> Result<Json<Vec<AdminStopResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.reorder_stops(id, request).await?))
}

async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VehicleLogResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.get_log(id).await?))
}

async fn create_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<CreateVehicleLogRequest>,
) -> Result<(StatusCode, Json<VehicleLogResponse>), AppError> {
    let controller = RouteController::new(state.pool.clone());
    let log = controller.create_log(id, user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

async fn update_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateVehicleLogRequest>,
) -> Result<Json<VehicleLogResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.update_log(id, user.user_id, request).await?))
}
