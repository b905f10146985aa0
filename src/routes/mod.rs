//! HTTP routes
//!
//! Driver endpoints at the root, login under `/api/auth` and the planner
//! API under `/api/admin` behind the staff check.

pub mod admin_stop_routes;
pub mod auth_routes;
pub mod collection_routes;
pub mod customer_routes;
pub mod health_routes;
pub mod route_definition_routes;
pub mod route_routes;
pub mod site_routes;
pub mod stop_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{middleware, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{auth::require_staff, cors::cors_layer};
use crate::state::AppState;

/// Planner API, staff only
pub fn create_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/customers", customer_routes::create_customer_router())
        .nest("/sites", site_routes::create_site_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/route-definitions", route_definition_routes::create_route_definition_router())
        .nest("/routes", route_routes::create_route_router())
        .nest("/stops", admin_stop_routes::create_admin_stop_router())
        .nest("/collections", collection_routes::create_collection_router())
        .nest("/users", user_routes::create_user_router())
        .route_layer(middleware::from_fn_with_state(state, require_staff))
}

/// Full application router
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(health_routes::create_health_router())
        .merge(stop_routes::create_stop_router())
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .nest("/api/admin", create_admin_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
