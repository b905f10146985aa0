use chrono::NaiveDate;
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::info;

use crate::dto::collection_dto::{CollectionCreateRequest, CollectionSubmittedResponse};
use crate::dto::stop_dto::{StopFailureRequest, StopResponse};
use crate::models::stop::FailureReason;
use crate::repositories::collection_repository::CollectionRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::stop_repository::StopRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::validate_not_blank;

pub const MISSING_VEHICLE_ID: &str = "A 'vehicle_id' parameter is required.";
pub const NO_ROUTE_TODAY: &str = "No route found for this vehicle today.";
pub const STOP_NOT_FOUND: &str = "Stop not found.";
pub const PENDING_STOP_NOT_FOUND: &str = "Pending stop not found or already completed.";
pub const COLLECTION_SUBMITTED: &str = "Collection submitted successfully.";

/// Driver-facing stop operations
pub struct StopController {
    routes: RouteRepository,
    stops: StopRepository,
    collections: CollectionRepository,
}

impl StopController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            stops: StopRepository::new(pool.clone()),
            collections: CollectionRepository::new(pool),
        }
    }

    /// Stops of the vehicle's route on `today`, by ascending sequence
    pub async fn list_for_vehicle(&self, vehicle_id: Option<&str>, today: NaiveDate) -> Result<Vec<StopResponse>, AppError> {
        let vehicle_id = parse_vehicle_id(vehicle_id)?;

        let route = self
            .routes
            .find_by_vehicle_and_date(vehicle_id, today)
            .await?
            .ok_or_else(|| AppError::NotFound(NO_ROUTE_TODAY.to_string()))?;

        let stops = self.stops.list_for_route(route.id).await?;
        Ok(stops.into_iter().map(StopResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<StopResponse, AppError> {
        self.stops
            .find_detail(id)
            .await?
            .map(StopResponse::from)
            .ok_or_else(|| AppError::NotFound(STOP_NOT_FOUND.to_string()))
    }

    /// Record a collection for a pending stop and mark the stop completed
    pub async fn submit_collection(&self, id: i64, body: &[u8]) -> Result<CollectionSubmittedResponse, AppError> {
        if self.stops.find_pending(id).await?.is_none() {
            return Err(AppError::NotFound(PENDING_STOP_NOT_FOUND.to_string()));
        }

        let request = CollectionCreateRequest::from_json(&parse_body(body)?)?;

        // lost a race with another submission for the same stop
        let collection = self
            .collections
            .create_for_pending_stop(id, &request)
            .await?
            .ok_or_else(|| AppError::NotFound(PENDING_STOP_NOT_FOUND.to_string()))?;

        info!(
            stop_id = id,
            collection_id = collection.id,
            waste_oil = %collection.waste_oil_quantity,
            "collection submitted"
        );

        Ok(CollectionSubmittedResponse {
            message: COLLECTION_SUBMITTED.to_string(),
            collection_id: collection.id,
            stop_id: id,
        })
    }

    /// Mark a pending stop failed with a reason
    pub async fn report_failure(&self, id: i64, body: &[u8]) -> Result<StopResponse, AppError> {
        if self.stops.find_pending(id).await?.is_none() {
            return Err(AppError::NotFound(PENDING_STOP_NOT_FOUND.to_string()));
        }

        let request: StopFailureRequest = serde_json::from_value(parse_body(body)?)
            .map_err(|e| validation_error("non_field_errors", "invalid", format!("Invalid data - {}", e)))?;
        let reason = parse_failure(&request)?;

        self.stops
            .mark_failed(id, reason, request.notes.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(PENDING_STOP_NOT_FOUND.to_string()))?;

        info!(stop_id = id, reason = ?reason, "stop marked as failed");
        self.get(id).await
    }
}

/// Raw request body to JSON; an empty body counts as `{}`
pub fn parse_body(body: &[u8]) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| validation_error("non_field_errors", "parse_error", format!("JSON parse error - {}", e)))
}

/// `vehicle_id` must be present and an integer
pub fn parse_vehicle_id(raw: Option<&str>) -> Result<i64, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest(MISSING_VEHICLE_ID.to_string()))?;

    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("'vehicle_id' must be an integer, got '{}'.", raw)))
}

/// A reason is required, and `OTHER` needs notes explaining it
pub fn parse_failure(request: &StopFailureRequest) -> Result<FailureReason, AppError> {
    let reason = request
        .failure_reason
        .parse::<FailureReason>()
        .map_err(|msg| validation_error("failure_reason", "invalid_choice", msg))?;

    if reason == FailureReason::Other && validate_not_blank(&request.notes).is_err() {
        return Err(validation_error(
            "notes",
            "required",
            "Notes are required when the failure reason is 'Other'.".to_string(),
        ));
    }
    Ok(reason)
}
