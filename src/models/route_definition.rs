//! Route definition model
//!
//! A reusable, named route such as "Cardiff South". Each day's `Route` is a
//! run of one of these.

use serde::Serialize;
use sqlx::FromRow;

/// Maps to the `route_definitions` table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RouteDefinition {
    pub id: i64,
    pub name: String,
    /// Inactive definitions are not offered for new runs
    pub is_active: bool,
}
