use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::stop::{FailureReason, StopDetail, StopStatus};

// Query string of the driver's stop list
#[derive(Debug, Default, Deserialize)]
pub struct StopListQuery {
    pub vehicle_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CustomerName {
    pub name: String,
}

// Site as shown to drivers
#[derive(Debug, Serialize, PartialEq)]
pub struct SiteSummary {
    pub id: i64,
    pub customer: CustomerName,
    pub address_line_1: String,
    pub city: String,
    pub postcode: String,
}

// Stop as shown to drivers
#[derive(Debug, Serialize, PartialEq)]
pub struct StopResponse {
    pub id: i64,
    pub sequence: i32,
    pub status: StopStatus,
    pub is_priority: bool,
    pub failure_reason: Option<FailureReason>,
    pub notes: String,
    pub site: SiteSummary,
}

impl From<StopDetail> for StopResponse {
    fn from(stop: StopDetail) -> Self {
        Self {
            id: stop.id,
            sequence: stop.sequence,
            status: stop.status,
            is_priority: stop.is_priority,
            failure_reason: stop.failure_reason,
            notes: stop.notes,
            site: SiteSummary {
                id: stop.site_id,
                customer: CustomerName {
                    name: stop.customer_name,
                },
                address_line_1: stop.address_line_1,
                city: stop.city,
                postcode: stop.postcode,
            },
        }
    }
}

// Stop as shown to planners
#[derive(Debug, Serialize)]
pub struct AdminStopResponse {
    pub id: i64,
    pub route_id: i64,
    pub title: String,
    pub sequence: i32,
    pub is_priority: bool,
    pub status: StopStatus,
    pub status_display: &'static str,
    pub failure_reason: Option<FailureReason>,
    pub failure_reason_display: Option<&'static str>,
    pub invoice_number: String,
    pub notes: String,
    pub site: SiteSummary,
}

impl From<StopDetail> for AdminStopResponse {
    fn from(stop: StopDetail) -> Self {
        let title = stop.inline_title();
        Self {
            id: stop.id,
            route_id: stop.route_id,
            title,
            sequence: stop.sequence,
            is_priority: stop.is_priority,
            status: stop.status,
            status_display: stop.status.label(),
            failure_reason: stop.failure_reason,
            failure_reason_display: stop.failure_reason.map(|r| r.label()),
            invoice_number: stop.invoice_number,
            notes: stop.notes,
            site: SiteSummary {
                id: stop.site_id,
                customer: CustomerName {
                    name: stop.customer_name,
                },
                address_line_1: stop.address_line_1,
                city: stop.city,
                postcode: stop.postcode,
            },
        }
    }
}

// Driver report of a stop that could not be serviced
#[derive(Debug, Deserialize)]
pub struct StopFailureRequest {
    pub failure_reason: String,
    #[serde(default)]
    pub notes: String,
}

// A stop added to a route by a planner
#[derive(Debug, Deserialize, Validate)]
pub struct NewStopRequest {
    pub site_id: i64,
    #[validate(range(min = 0))]
    pub sequence: Option<i32>,
    #[serde(default)]
    pub is_priority: bool,
}

// Planner edit of a stop
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStopRequest {
    pub site_id: Option<i64>,
    #[validate(range(min = 0))]
    pub sequence: Option<i32>,
    pub is_priority: Option<bool>,
    pub status: Option<StopStatus>,
    pub failure_reason: Option<FailureReason>,
    #[serde(default)]
    pub clear_failure_reason: bool,
    #[validate(length(max = 50))]
    pub invoice_number: Option<String>,
    pub notes: Option<String>,
}

// New order of a route's stops
#[derive(Debug, Deserialize)]
pub struct ReorderStopsRequest {
    pub stop_ids: Vec<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StopFilters {
    pub route_id: Option<i64>,
    pub status: Option<StopStatus>,
}
