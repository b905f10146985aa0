//! Daily vehicle log model
//!
//! Start and end-of-day stock totals for a route's vehicle, filled in by
//! the warehouse manager for auditing. One per route.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Maps to the `daily_vehicle_logs` table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailyVehicleLog {
    pub id: i64,
    pub route_id: i64,
    pub start_day_waste_oil: Decimal,
    pub end_day_waste_oil: Decimal,
    pub start_day_fresh_oil: Decimal,
    pub end_day_fresh_oil: Decimal,
    /// Manager who verified the totals
    pub checked_by_id: i64,
    pub log_time: DateTime<Utc>,
}

impl DailyVehicleLog {
    /// Net waste oil collected over the day
    pub fn waste_oil_collected(&self) -> Decimal {
        self.end_day_waste_oil - self.start_day_waste_oil
    }

    /// Net fresh oil delivered over the day
    pub fn fresh_oil_delivered(&self) -> Decimal {
        self.start_day_fresh_oil - self.end_day_fresh_oil
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn log(start_waste: &str, end_waste: &str, start_fresh: &str, end_fresh: &str) -> DailyVehicleLog {
        DailyVehicleLog {
            id: 1,
            route_id: 1,
            start_day_waste_oil: Decimal::from_str(start_waste).unwrap(),
            end_day_waste_oil: Decimal::from_str(end_waste).unwrap(),
            start_day_fresh_oil: Decimal::from_str(start_fresh).unwrap(),
            end_day_fresh_oil: Decimal::from_str(end_fresh).unwrap(),
            checked_by_id: 1,
            log_time: Utc::now(),
        }
    }

    #[test]
    fn waste_oil_collected_is_end_minus_start() {
        let log = log("120.50", "980.25", "0", "0");
        assert_eq!(log.waste_oil_collected(), Decimal::from_str("859.75").unwrap());
    }

    #[test]
    fn fresh_oil_delivered_is_start_minus_end() {
        let log = log("0", "0", "400.00", "160.00");
        assert_eq!(log.fresh_oil_delivered(), Decimal::from(240));
    }

    #[test]
    fn shortfalls_come_out_negative() {
        let log = log("50", "40", "10", "20");
        assert_eq!(log.waste_oil_collected(), Decimal::from(-10));
        assert_eq!(log.fresh_oil_delivered(), Decimal::from(-10));
    }
}
