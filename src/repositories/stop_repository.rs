use sqlx::PgPool;

use crate::dto::stop_dto::StopFilters;
use crate::models::stop::{FailureReason, Stop, StopDetail, StopStatus};
use crate::utils::errors::AppError;

const STOP_DETAIL_SELECT: &str = r#"
    SELECT s.id, s.route_id, r.route_date, s.sequence, s.is_priority, s.status,
           s.failure_reason, s.invoice_number, s.notes, s.site_id,
           si.address_line_1, si.city, si.postcode, c.name AS customer_name
    FROM stops s
    JOIN routes r ON r.id = s.route_id
    JOIN sites si ON si.id = s.site_id
    JOIN customers c ON c.id = si.customer_id
"#;

pub struct StopRepository {
    pool: PgPool,
}

impl StopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stops of a route by ascending sequence; ties keep insertion order
    pub async fn list_for_route(&self, route_id: i64) -> Result<Vec<StopDetail>, AppError> {
        let sql = format!("{} WHERE s.route_id = $1 ORDER BY s.sequence, s.id", STOP_DETAIL_SELECT);
        let stops = sqlx::query_as::<_, StopDetail>(&sql)
            .bind(route_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(stops)
    }

    pub async fn list(&self, filters: &StopFilters) -> Result<Vec<StopDetail>, AppError> {
        let sql = format!(
            r#"{}
            WHERE ($1::bigint IS NULL OR s.route_id = $1)
            AND ($2::stop_status IS NULL OR s.status = $2)
            ORDER BY r.route_date DESC, s.route_id, s.sequence, s.id"#,
            STOP_DETAIL_SELECT
        );
        let stops = sqlx::query_as::<_, StopDetail>(&sql)
            .bind(filters.route_id)
            .bind(filters.status)
            .fetch_all(&self.pool)
            .await?;
        Ok(stops)
    }

    pub async fn find_detail(&self, id: i64) -> Result<Option<StopDetail>, AppError> {
        let sql = format!("{} WHERE s.id = $1", STOP_DETAIL_SELECT);
        let stop = sqlx::query_as::<_, StopDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stop)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Stop>, AppError> {
        let stop = sqlx::query_as::<_, Stop>("SELECT * FROM stops WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stop)
    }

    /// The stop, only while it is still pending
    pub async fn find_pending(&self, id: i64) -> Result<Option<Stop>, AppError> {
        let stop = sqlx::query_as::<_, Stop>("SELECT * FROM stops WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(StopStatus::Pending)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stop)
    }

    pub async fn ids_for_route(&self, route_id: i64) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM stops WHERE route_id = $1")
            .bind(route_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    pub async fn next_sequence(&self, route_id: i64) -> Result<i32, AppError> {
        let (next,): (i32,) = sqlx::query_as("SELECT COALESCE(MAX(sequence), 0) + 1 FROM stops WHERE route_id = $1")
            .bind(route_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(next)
    }

    pub async fn create(&self, route_id: i64, site_id: i64, sequence: i32, is_priority: bool) -> Result<Stop, AppError> {
        let stop = sqlx::query_as::<_, Stop>(
            r#"
            INSERT INTO stops (route_id, site_id, sequence, is_priority)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(route_id)
        .bind(site_id)
        .bind(sequence)
        .bind(is_priority)
        .fetch_one(&self.pool)
        .await?;
        Ok(stop)
    }

    pub async fn update(&self, stop: &Stop) -> Result<Stop, AppError> {
        let updated = sqlx::query_as::<_, Stop>(
            r#"
            UPDATE stops
            SET site_id = $2, sequence = $3, is_priority = $4, status = $5,
                failure_reason = $6, invoice_number = $7, notes = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(stop.id)
        .bind(stop.site_id)
        .bind(stop.sequence)
        .bind(stop.is_priority)
        .bind(stop.status)
        .bind(stop.failure_reason)
        .bind(&stop.invoice_number)
        .bind(&stop.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Pending -> failed. `None` when the stop was not pending any more.
    pub async fn mark_failed(&self, id: i64, reason: FailureReason, notes: &str) -> Result<Option<Stop>, AppError> {
        let stop = sqlx::query_as::<_, Stop>(
            r#"
            UPDATE stops
            SET status = $2, failure_reason = $3,
                notes = CASE WHEN $4::text = '' THEN notes ELSE $4::text END
            WHERE id = $1 AND status = $5
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(StopStatus::Failed)
        .bind(reason)
        .bind(notes)
        .bind(StopStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;
        Ok(stop)
    }

    /// Assign sequence 1..n following `ordered_ids`
    pub async fn reorder(&self, route_id: i64, ordered_ids: &[i64]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for (position, stop_id) in ordered_ids.iter().enumerate() {
            sqlx::query("UPDATE stops SET sequence = $1 WHERE id = $2 AND route_id = $3")
                .bind(position as i32 + 1)
                .bind(stop_id)
                .bind(route_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Removes the stop and, through the foreign key, its collection
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM stops WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
