//! HTTP middleware
//!
//! Bearer token authentication and CORS.

pub mod auth;
pub mod cors;

pub use auth::{require_staff, require_user, AuthenticatedUser};
pub use cors::cors_layer;
