use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dto::stop_dto::{AdminStopResponse, NewStopRequest};
use crate::dto::vehicle_log_dto::VehicleLogResponse;
use crate::models::route::{RouteDriver, RouteSummary};

// Request to plan a route, optionally with its drivers and stops
#[derive(Debug, Deserialize)]
pub struct CreateRouteRequest {
    pub definition_id: i64,
    pub vehicle_id: i64,
    pub route_date: NaiveDate,
    #[serde(default)]
    pub driver_ids: Vec<i64>,
    #[serde(default)]
    pub stops: Vec<NewStopRequest>,
}

// Request to update a route; `driver_ids` replaces the driver list when present
#[derive(Debug, Deserialize)]
pub struct UpdateRouteRequest {
    pub definition_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub route_date: Option<NaiveDate>,
    pub driver_ids: Option<Vec<i64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RouteFilters {
    pub route_date: Option<NaiveDate>,
    pub definition_id: Option<i64>,
    pub vehicle_id: Option<i64>,
}

// Route as listed to planners
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: i64,
    pub display_name: String,
    pub route_date: NaiveDate,
    pub definition_id: i64,
    pub definition_name: String,
    pub vehicle_id: i64,
    pub vehicle: String,
    pub stop_count: i64,
}

impl From<RouteSummary> for RouteResponse {
    fn from(route: RouteSummary) -> Self {
        Self {
            display_name: route.display_name(),
            vehicle: format!("{} ({})", route.vehicle_nickname, route.vehicle_registration),
            id: route.id,
            route_date: route.route_date,
            definition_id: route.definition_id,
            definition_name: route.definition_name,
            vehicle_id: route.vehicle_id,
            stop_count: route.stop_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<RouteDriver> for DriverResponse {
    fn from(driver: RouteDriver) -> Self {
        Self {
            id: driver.user_id,
            username: driver.username,
            first_name: driver.first_name,
            last_name: driver.last_name,
        }
    }
}

// Route with its drivers, ordered stops and log
#[derive(Debug, Serialize)]
pub struct RouteDetailResponse {
    #[serde(flatten)]
    pub route: RouteResponse,
    pub drivers: Vec<DriverResponse>,
    pub stops: Vec<AdminStopResponse>,
    pub log: Option<VehicleLogResponse>,
}
