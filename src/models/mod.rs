//! Data models
//!
//! Row structs mapping the PostgreSQL schema in `migrations/`, plus the
//! enums stored as Postgres ENUM types.

pub mod collection;
pub mod customer;
pub mod route;
pub mod route_definition;
pub mod site;
pub mod stop;
pub mod user;
pub mod vehicle;
pub mod vehicle_log;
