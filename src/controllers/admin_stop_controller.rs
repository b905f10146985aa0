use sqlx::PgPool;
use validator::Validate;

use crate::dto::stop_dto::{AdminStopResponse, StopFilters, UpdateStopRequest};
use crate::models::stop::Stop;
use crate::repositories::site_repository::SiteRepository;
use crate::repositories::stop_repository::StopRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};

/// Planner-side stop maintenance
pub struct AdminStopController {
    stops: StopRepository,
    sites: SiteRepository,
}

impl AdminStopController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            stops: StopRepository::new(pool.clone()),
            sites: SiteRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: &StopFilters) -> Result<Vec<AdminStopResponse>, AppError> {
        let stops = self.stops.list(filters).await?;
        Ok(stops.into_iter().map(AdminStopResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<AdminStopResponse, AppError> {
        self.stops
            .find_detail(id)
            .await?
            .map(AdminStopResponse::from)
            .ok_or_else(|| not_found_error("Stop", id))
    }

    pub async fn update(&self, id: i64, request: UpdateStopRequest) -> Result<AdminStopResponse, AppError> {
        request.validate()?;
        let current = self
            .stops
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Stop", id))?;

        if let Some(site_id) = request.site_id {
            if !self.sites.exists(site_id).await? {
                return Err(validation_error(
                    "site_id",
                    "does_not_exist",
                    format!("Invalid pk \"{}\" - object does not exist.", site_id),
                ));
            }
        }

        let merged = merge_stop_update(current, request);
        self.stops.update(&merged).await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.stops.delete(id).await? {
            return Err(not_found_error("Stop", id));
        }
        Ok(())
    }
}

/// Apply a partial edit to a stop
pub fn merge_stop_update(current: Stop, request: UpdateStopRequest) -> Stop {
    let failure_reason = if request.clear_failure_reason {
        None
    } else {
        request.failure_reason.or(current.failure_reason)
    };

    Stop {
        id: current.id,
        route_id: current.route_id,
        site_id: request.site_id.unwrap_or(current.site_id),
        sequence: request.sequence.unwrap_or(current.sequence),
        is_priority: request.is_priority.unwrap_or(current.is_priority),
        status: request.status.unwrap_or(current.status),
        failure_reason,
        invoice_number: request.invoice_number.unwrap_or(current.invoice_number),
        notes: request.notes.unwrap_or(current.notes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stop::{FailureReason, StopStatus};
    use serde_json::json;

    fn stop() -> Stop {
        Stop {
            id: 3,
            route_id: 1,
            site_id: 8,
            sequence: 2,
            is_priority: false,
            status: StopStatus::Failed,
            failure_reason: Some(FailureReason::ShopClosed),
            invoice_number: String::new(),
            notes: "Gate locked".to_string(),
        }
    }

    fn request(body: serde_json::Value) -> UpdateStopRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn absent_fields_are_left_unchanged() {
        let merged = merge_stop_update(stop(), request(json!({ "invoice_number": "INV-42" })));
        assert_eq!(merged.invoice_number, "INV-42");
        assert_eq!(merged.sequence, 2);
        assert_eq!(merged.status, StopStatus::Failed);
        assert_eq!(merged.failure_reason, Some(FailureReason::ShopClosed));
        assert_eq!(merged.notes, "Gate locked");
    }

    #[test]
    fn stop_can_be_reset_to_pending() {
        let merged = merge_stop_update(
            stop(),
            request(json!({ "status": "PENDING", "clear_failure_reason": true, "is_priority": true })),
        );
        assert_eq!(merged.status, StopStatus::Pending);
        assert_eq!(merged.failure_reason, None);
        assert!(merged.is_priority);
    }

    #[test]
    fn negative_sequence_fails_validation() {
        assert!(request(json!({ "sequence": -1 })).validate().is_err());
    }
}
