use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::site_controller::SiteController;
use crate::dto::api_response::ApiResponse;
use crate::dto::site_dto::{CreateSiteRequest, SiteFilters, SiteResponse, UpdateSiteRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_site_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sites).post(create_site))
        .route("/:id", get(get_site).put(update_site).delete(delete_site))
}

async fn list_sites(
    State(state): State<AppState>,
    Query(filters): Query<SiteFilters>,
) -> Result<Json<Vec<SiteResponse>>, AppError> {
    let controller = SiteController::new(state.pool.clone());
    Ok(Json(controller.list(filters.customer_id).await?))
}

async fn create_site(
    State(state): State<AppState>,
    Json(request): Json<CreateSiteRequest>,
) -> Result<(StatusCode, Json<SiteResponse>), AppError> {
    let controller = SiteController::new(state.pool.clone());
    let site = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(site)))
}

async fn get_site(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SiteResponse>, AppError> {
    let controller = SiteController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_site(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSiteRequest>,
) -> Result<Json<SiteResponse>, AppError> {
    let controller = SiteController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_site(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = SiteController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Site deleted")))
}
