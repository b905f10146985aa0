//! Collection model
//!
//! The transaction record for a serviced stop: waste oil taken, fresh oil
//! delivered and money exchanged. Exactly one per stop.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Fresh oil container - maps to the `fresh_oil_container` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "fresh_oil_container", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FreshOilContainer {
    Box,
    Barrel,
}

impl FreshOilContainer {
    pub fn label(&self) -> &'static str {
        match self {
            FreshOilContainer::Box => "Box (20L)",
            FreshOilContainer::Barrel => "Barrel (200L)",
        }
    }
}

impl FromStr for FreshOilContainer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOX" => Ok(FreshOilContainer::Box),
            "BARREL" => Ok(FreshOilContainer::Barrel),
            other => Err(format!("\"{}\" is not a valid choice.", other)),
        }
    }
}

/// Maps to the `collections` table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Collection {
    pub id: i64,
    pub stop_id: i64,
    pub waste_oil_quantity: Decimal,
    pub payment_made: Decimal,
    pub fresh_oil_container_type: Option<FreshOilContainer>,
    pub fresh_oil_container_qty: i32,
    pub fresh_oil_total_litres: Decimal,
    pub payment_received: Decimal,
    pub docket_number: String,
    pub docket_image: Option<String>,
    pub timestamp: DateTime<Utc>,
}
