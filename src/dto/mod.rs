//! Request and response shapes
//!
//! What the API accepts and returns, kept apart from the row models.

pub mod api_response;
pub mod auth_dto;
pub mod collection_dto;
pub mod customer_dto;
pub mod route_definition_dto;
pub mod route_dto;
pub mod site_dto;
pub mod stop_dto;
pub mod user_dto;
pub mod vehicle_dto;
pub mod vehicle_log_dto;
