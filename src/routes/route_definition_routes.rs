use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::route_definition_controller::RouteDefinitionController;
use crate::dto::api_response::ApiResponse;
use crate::dto::route_definition_dto::{
    CreateRouteDefinitionRequest, RouteDefinitionFilters, UpdateRouteDefinitionRequest,
};
use crate::models::route_definition::RouteDefinition;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_definition_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_definitions).post(create_definition))
        .route("/:id", get(get_definition).put(update_definition).delete(delete_definition))
}

async fn list_definitions(
    State(state): State<AppState>,
    Query(filters): Query<RouteDefinitionFilters>,
) -> Result<Json<Vec<RouteDefinition>>, AppError> {
    let controller = RouteDefinitionController::new(state.pool.clone());
    Ok(Json(controller.list(filters.active).await?))
}

async fn create_definition(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteDefinitionRequest>,
) -> Result<(StatusCode, Json<RouteDefinition>), AppError> {
    let controller = RouteDefinitionController::new(state.pool.clone());
    let definition = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(definition)))
}

async fn get_definition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RouteDefinition>, AppError> {
    let controller = RouteDefinitionController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_definition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRouteDefinitionRequest>,
) -> Result<Json<RouteDefinition>, AppError> {
    let controller = RouteDefinitionController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_definition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = RouteDefinitionController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Route definition deleted")))
}
