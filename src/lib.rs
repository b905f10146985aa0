//! Waste-oil collection route management
//!
//! Driver API for the day's stops and collection submissions, plus the
//! planner API used to maintain customers, sites, vehicles and routes.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
