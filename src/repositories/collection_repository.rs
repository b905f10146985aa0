use sqlx::PgPool;

use crate::dto::collection_dto::CollectionCreateRequest;
use crate::models::collection::Collection;
use crate::models::stop::StopStatus;
use crate::utils::errors::AppError;

pub struct CollectionRepository {
    pool: PgPool,
}

impl CollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record the collection and complete the stop in one transaction.
    ///
    /// The status flip only matches a pending stop, so of two concurrent
    /// submissions for the same stop exactly one commits; the other gets
    /// `None`.
    pub async fn create_for_pending_stop(
        &self,
        stop_id: i64,
        request: &CollectionCreateRequest,
    ) -> Result<Option<Collection>, AppError> {
        let mut tx = self.pool.begin().await?;

        let completed = sqlx::query("UPDATE stops SET status = $2 WHERE id = $1 AND status = $3")
            .bind(stop_id)
            .bind(StopStatus::Completed)
            .bind(StopStatus::Pending)
            .execute(&mut *tx)
            .await?;

        if completed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let collection = sqlx::query_as::<_, Collection>(
            r#"
            INSERT INTO collections (
                stop_id, waste_oil_quantity, payment_made, fresh_oil_container_type,
                fresh_oil_container_qty, fresh_oil_total_litres, payment_received, docket_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(stop_id)
        .bind(request.waste_oil_quantity)
        .bind(request.payment_made)
        .bind(request.fresh_oil_container_type)
        .bind(request.fresh_oil_container_qty)
        .bind(request.fresh_oil_total_litres)
        .bind(request.payment_received)
        .bind(&request.docket_number)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(collection))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Collection>, AppError> {
        let collection = sqlx::query_as::<_, Collection>("SELECT * FROM collections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(collection)
    }

    pub async fn list(&self, route_id: Option<i64>) -> Result<Vec<Collection>, AppError> {
        let collections = sqlx::query_as::<_, Collection>(
            r#"
            SELECT col.*
            FROM collections col
            JOIN stops s ON s.id = col.stop_id
            WHERE ($1::bigint IS NULL OR s.route_id = $1)
            ORDER BY col.timestamp DESC, col.id DESC
            "#,
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(collections)
    }
}
