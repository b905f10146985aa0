use sqlx::PgPool;

use crate::dto::vehicle_log_dto::CreateVehicleLogRequest;
use crate::models::vehicle_log::DailyVehicleLog;
use crate::utils::errors::AppError;

pub struct VehicleLogRepository {
    pool: PgPool,
}

impl VehicleLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_route(&self, route_id: i64) -> Result<Option<DailyVehicleLog>, AppError> {
        let log = sqlx::query_as::<_, DailyVehicleLog>("SELECT * FROM daily_vehicle_logs WHERE route_id = $1")
            .bind(route_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(log)
    }

    pub async fn create(
        &self,
        route_id: i64,
        checked_by_id: i64,
        request: &CreateVehicleLogRequest,
    ) -> Result<DailyVehicleLog, AppError> {
        let log = sqlx::query_as::<_, DailyVehicleLog>(
            r#"
            INSERT INTO daily_vehicle_logs (
                route_id, start_day_waste_oil, end_day_waste_oil,
                start_day_fresh_oil, end_day_fresh_oil, checked_by_id
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(route_id)
        .bind(request.start_day_waste_oil)
        .bind(request.end_day_waste_oil)
        .bind(request.start_day_fresh_oil)
        .bind(request.end_day_fresh_oil)
        .bind(checked_by_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(log)
    }

    pub async fn update(&self, log: &DailyVehicleLog) -> Result<DailyVehicleLog, AppError> {
        let updated = sqlx::query_as::<_, DailyVehicleLog>(
            r#"
            UPDATE daily_vehicle_logs
            SET start_day_waste_oil = $2, end_day_waste_oil = $3,
                start_day_fresh_oil = $4, end_day_fresh_oil = $5, checked_by_id = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(log.id)
        .bind(log.start_day_waste_oil)
        .bind(log.end_day_waste_oil)
        .bind(log.start_day_fresh_oil)
        .bind(log.end_day_fresh_oil)
        .bind(log.checked_by_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }
}
