//! Error handling
//!
//! Every fallible operation in the service returns an `AppError`, which
//! renders itself as a JSON body with the matching HTTP status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Postgres SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_error) = e.as_database_error() {
            match db_error.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    let constraint = db_error.constraint().unwrap_or("unique constraint");
                    return AppError::Conflict(format!("A record with these values already exists ({})", constraint));
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    let constraint = db_error.constraint().unwrap_or("foreign key");
                    return AppError::Conflict(format!(
                        "The record is referenced by, or references, another record ({})",
                        constraint
                    ));
                }
                _ => {}
            }
        }
        AppError::Database(e)
    }
}

/// Error body returned by the API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "An error occurred while accessing the database".to_string(),
                        "DB_ERROR",
                    ),
                )
            }

            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        details: Some(json!(e)),
                        ..ErrorResponse::new(
                            "Validation Error",
                            "The provided data is invalid".to_string(),
                            "VALIDATION_ERROR",
                        )
                    },
                )
            }

            AppError::Unauthorized(msg) => {
                warn!("Unauthorized access: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED"))
            }

            AppError::Forbidden(msg) => {
                warn!("Forbidden access: {}", msg);
                (StatusCode::FORBIDDEN, ErrorResponse::new("Forbidden", msg, "FORBIDDEN"))
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new("Not Found", msg, "NOT_FOUND"))
            }

            AppError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorResponse::new("Conflict", msg, "CONFLICT"))
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"))
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Internal Server Error",
                        "An unexpected error occurred".to_string(),
                        "INTERNAL_ERROR",
                    ),
                )
            }

            AppError::Jwt(msg) => {
                warn!("JWT error: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorResponse::new("JWT Error", msg, "JWT_ERROR"))
            }

            AppError::Hash(msg) => {
                error!("Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Hash Error",
                        "An error occurred while processing credentials".to_string(),
                        "HASH_ERROR",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result alias for fallible operations
pub type AppResult<T> = Result<T, AppError>;

/// Build a single-field validation error
pub fn validation_error(field: &'static str, code: &'static str, message: String) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, crate::utils::validation::field_error(code, message));
    AppError::Validation(errors)
}

/// Build a not-found error for a resource id
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn into_parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let (status, body) = into_parts(not_found_error("Stop", 7)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "Stop with id '7' not found");
    }

    #[tokio::test]
    async fn validation_error_names_the_field() {
        let err = validation_error("waste_oil_quantity", "invalid", "A valid number is required.".to_string());
        let (status, body) = into_parts(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["details"]["waste_oil_quantity"][0]["message"],
            "A valid number is required."
        );
    }

    #[tokio::test]
    async fn conflict_and_auth_errors_map_to_their_statuses() {
        let (status, _) = into_parts(AppError::Conflict("dup".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) = into_parts(AppError::Unauthorized("no token".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = into_parts(AppError::Forbidden("not staff".into())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn database_errors_do_not_leak_sql() {
        let (status, body) = into_parts(AppError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "DB_ERROR");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn row_not_found_stays_a_database_error() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(_)));
    }
}
