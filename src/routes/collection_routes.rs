use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::collection_controller::CollectionController;
use crate::dto::collection_dto::{CollectionFilters, CollectionResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_collection_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_collections))
        .route("/:id", get(get_collection))
}

async fn list_collections(
    State(state): State<AppState>,
    Query(filters): Query<CollectionFilters>,
) -> Result<Json<Vec<CollectionResponse>>, AppError> {
    let controller = CollectionController::new(state.pool.clone());
    Ok(Json(controller.list(&filters).await?))
}

async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CollectionResponse>, AppError> {
    let controller = CollectionController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}
