use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle_log::DailyVehicleLog;

// Stock totals recorded by the warehouse manager
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleLogRequest {
    #[serde(default)]
    #[validate(custom = "crate::utils::validation::validate_quantity")]
    pub start_day_waste_oil: Decimal,
    #[serde(default)]
    #[validate(custom = "crate::utils::validation::validate_quantity")]
    pub end_day_waste_oil: Decimal,
    #[serde(default)]
    #[validate(custom = "crate::utils::validation::validate_quantity")]
    pub start_day_fresh_oil: Decimal,
    #[serde(default)]
    #[validate(custom = "crate::utils::validation::validate_quantity")]
    pub end_day_fresh_oil: Decimal,
}

// Corrections to a recorded log; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleLogRequest {
    #[validate(custom = "crate::utils::validation::validate_quantity")]
    pub start_day_waste_oil: Option<Decimal>,
    #[validate(custom = "crate::utils::validation::validate_quantity")]
    pub end_day_waste_oil: Option<Decimal>,
    #[validate(custom = "crate::utils::validation::validate_quantity")]
    pub start_day_fresh_oil: Option<Decimal>,
    #[validate(custom = "crate::utils::validation::validate_quantity")]
    pub end_day_fresh_oil: Option<Decimal>,
}

// Log with the derived day totals
#[derive(Debug, Serialize)]
pub struct VehicleLogResponse {
    pub id: i64,
    pub route_id: i64,
    pub start_day_waste_oil: Decimal,
    pub end_day_waste_oil: Decimal,
    pub start_day_fresh_oil: Decimal,
    pub end_day_fresh_oil: Decimal,
    pub waste_oil_collected: Decimal,
    pub fresh_oil_delivered: Decimal,
    pub checked_by_id: i64,
    pub log_time: DateTime<Utc>,
}

impl From<DailyVehicleLog> for VehicleLogResponse {
    fn from(log: DailyVehicleLog) -> Self {
        Self {
            waste_oil_collected: log.waste_oil_collected(),
            fresh_oil_delivered: log.fresh_oil_delivered(),
            id: log.id,
            route_id: log.route_id,
            start_day_waste_oil: log.start_day_waste_oil,
            end_day_waste_oil: log.end_day_waste_oil,
            start_day_fresh_oil: log.start_day_fresh_oil,
            end_day_fresh_oil: log.end_day_fresh_oil,
            checked_by_id: log.checked_by_id,
            log_time: log.log_time,
        }
    }
}
