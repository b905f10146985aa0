//! Route model
//!
//! One day's run of a route definition by a vehicle, with its assigned
//! drivers. A vehicle runs at most one route per date.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Maps to the `routes` table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Route {
    pub id: i64,
    pub definition_id: i64,
    pub vehicle_id: i64,
    pub route_date: NaiveDate,
}

/// A route joined with its definition and vehicle, as listed to planners
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RouteSummary {
    pub id: i64,
    pub definition_id: i64,
    pub definition_name: String,
    pub vehicle_id: i64,
    pub vehicle_registration: String,
    pub vehicle_nickname: String,
    pub route_date: NaiveDate,
    pub stop_count: i64,
}

impl RouteSummary {
    /// e.g. "Cardiff South on 2025-03-14"
    pub fn display_name(&self) -> String {
        format!("{} on {}", self.definition_name, self.route_date)
    }
}

/// A driver assigned to a route
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RouteDriver {
    pub route_id: i64,
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}
