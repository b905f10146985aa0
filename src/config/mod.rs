//! Service configuration
//!
//! Database settings and environment variables.

pub mod database;
pub mod environment;

pub use environment::*;
