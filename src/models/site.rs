//! Site model
//!
//! A physical collection/delivery location belonging to a customer.

use serde::Serialize;
use sqlx::FromRow;

/// Maps to the `sites` table, joined with the owning customer's name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Site {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    /// The route definition this site normally belongs to
    pub default_route_id: Option<i64>,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub postcode: String,
}

impl Site {
    /// e.g. "Castle Fish Bar - CF10 1AA"
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.customer_name, self.postcode)
    }
}
