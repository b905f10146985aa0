//! Data access
//!
//! One repository per table, each holding a clone of the pool.

pub mod collection_repository;
pub mod customer_repository;
pub mod route_definition_repository;
pub mod route_repository;
pub mod site_repository;
pub mod stop_repository;
pub mod user_repository;
pub mod vehicle_log_repository;
pub mod vehicle_repository;
