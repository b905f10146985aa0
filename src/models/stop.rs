//! Stop model
//!
//! A site visit within a route. Drivers move a stop out of `PENDING` by
//! submitting a collection (`COMPLETED`) or reporting a failure (`FAILED`).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Stop status - maps to the `stop_status` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "stop_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopStatus {
    Pending,
    Completed,
    Failed,
}

impl StopStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopStatus::Pending => "PENDING",
            StopStatus::Completed => "COMPLETED",
            StopStatus::Failed => "FAILED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StopStatus::Pending => "Pending",
            StopStatus::Completed => "Completed",
            StopStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for StopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StopStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(StopStatus::Pending),
            "COMPLETED" => Ok(StopStatus::Completed),
            "FAILED" => Ok(StopStatus::Failed),
            other => Err(format!("\"{}\" is not a valid choice.", other)),
        }
    }
}

/// Why a stop could not be serviced - maps to the `failure_reason` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "failure_reason", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    NoCollection,
    ShopClosed,
    PoorAccess,
    Other,
}

impl FailureReason {
    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::NoCollection => "Customer did not need a collection",
            FailureReason::ShopClosed => "Shop closed",
            FailureReason::PoorAccess => "Poor access",
            FailureReason::Other => "Other (see notes)",
        }
    }
}

impl FromStr for FailureReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NO_COLLECTION" => Ok(FailureReason::NoCollection),
            "SHOP_CLOSED" => Ok(FailureReason::ShopClosed),
            "POOR_ACCESS" => Ok(FailureReason::PoorAccess),
            "OTHER" => Ok(FailureReason::Other),
            other => Err(format!("\"{}\" is not a valid choice.", other)),
        }
    }
}

/// Maps to the `stops` table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Stop {
    pub id: i64,
    pub route_id: i64,
    pub site_id: i64,
    pub sequence: i32,
    pub is_priority: bool,
    pub status: StopStatus,
    pub failure_reason: Option<FailureReason>,
    pub invoice_number: String,
    pub notes: String,
}

/// A stop joined with its site, customer and route date
#[derive(Debug, Clone, FromRow)]
pub struct StopDetail {
    pub id: i64,
    pub route_id: i64,
    pub route_date: NaiveDate,
    pub sequence: i32,
    pub is_priority: bool,
    pub status: StopStatus,
    pub failure_reason: Option<FailureReason>,
    pub invoice_number: String,
    pub notes: String,
    pub site_id: i64,
    pub address_line_1: String,
    pub city: String,
    pub postcode: String,
    pub customer_name: String,
}

impl StopDetail {
    /// Title shown to planners, e.g. "Castle Fish Bar - 14/03/2025"
    pub fn inline_title(&self) -> String {
        format!("{} - {}", self.customer_name, self.route_date.format("%d/%m/%Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_parse_case_insensitively() {
        assert_eq!("pending".parse::<StopStatus>().unwrap(), StopStatus::Pending);
        assert_eq!("COMPLETED".parse::<StopStatus>().unwrap(), StopStatus::Completed);
        assert!("DONE".parse::<StopStatus>().is_err());
    }

    #[test]
    fn statuses_serialize_as_upper_case() {
        assert_eq!(serde_json::to_value(StopStatus::Failed).unwrap(), "FAILED");
        assert_eq!(
            serde_json::to_value(FailureReason::NoCollection).unwrap(),
            "NO_COLLECTION"
        );
    }

    #[test]
    fn failure_reasons_parse() {
        assert_eq!("shop_closed".parse::<FailureReason>().unwrap(), FailureReason::ShopClosed);
        assert!("LATE".parse::<FailureReason>().is_err());
    }

    #[test]
    fn inline_title_uses_day_first_dates() {
        let stop = StopDetail {
            id: 1,
            route_id: 1,
            route_date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            sequence: 1,
            is_priority: false,
            status: StopStatus::Pending,
            failure_reason: None,
            invoice_number: String::new(),
            notes: String::new(),
            site_id: 1,
            address_line_1: "1 High St".to_string(),
            city: "Cardiff".to_string(),
            postcode: "CF10 1AA".to_string(),
            customer_name: "Castle Fish Bar".to_string(),
        };
        assert_eq!(stop.inline_title(), "Castle Fish Bar - 04/03/2025");
    }
}
