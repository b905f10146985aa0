//! Controllers
//!
//! Business rules between the HTTP handlers and the repositories.

pub mod admin_stop_controller;
pub mod auth_controller;
pub mod collection_controller;
pub mod customer_controller;
pub mod route_controller;
pub mod route_definition_controller;
pub mod site_controller;
pub mod stop_controller;
pub mod user_controller;
pub mod vehicle_controller;
