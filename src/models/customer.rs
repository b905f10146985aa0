//! Customer model
//!
//! The business entity a collection contract is held with.

use serde::Serialize;
use sqlx::FromRow;

/// Maps to the `customers` table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: String,
}
