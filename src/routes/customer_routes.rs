use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::customer_controller::CustomerController;
use crate::dto::api_response::ApiResponse;
use crate::dto::customer_dto::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::models::customer::Customer;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/:id", get(get_customer).put(update_customer).delete(delete_customer))
}

async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let customer = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<Customer>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Customer deleted")))
}
