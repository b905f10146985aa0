use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use crate::dto::route_dto::RouteFilters;
use crate::dto::stop_dto::NewStopRequest;
use crate::models::route::{Route, RouteDriver, RouteSummary};
use crate::utils::errors::AppError;

const ROUTE_SUMMARY_SELECT: &str = r#"
    SELECT r.id, r.definition_id, d.name AS definition_name,
           r.vehicle_id, v.registration_number AS vehicle_registration,
           v.nickname AS vehicle_nickname, r.route_date,
           (SELECT COUNT(*) FROM stops s WHERE s.route_id = r.id) AS stop_count
    FROM routes r
    JOIN route_definitions d ON d.id = r.definition_id
    JOIN vehicles v ON v.id = r.vehicle_id
"#;

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Newest first, then by definition name
    pub async fn list(&self, filters: &RouteFilters) -> Result<Vec<RouteSummary>, AppError> {
        let sql = format!(
            r#"{}
            WHERE ($1::date IS NULL OR r.route_date = $1)
            AND ($2::bigint IS NULL OR r.definition_id = $2)
            AND ($3::bigint IS NULL OR r.vehicle_id = $3)
            ORDER BY r.route_date DESC, d.name, r.id"#,
            ROUTE_SUMMARY_SELECT
        );
        let routes = sqlx::query_as::<_, RouteSummary>(&sql)
            .bind(filters.route_date)
            .bind(filters.definition_id)
            .bind(filters.vehicle_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(routes)
    }

    pub async fn find_summary(&self, id: i64) -> Result<Option<RouteSummary>, AppError> {
        let sql = format!("{} WHERE r.id = $1", ROUTE_SUMMARY_SELECT);
        let route = sqlx::query_as::<_, RouteSummary>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(route)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(route)
    }

    /// The route a vehicle runs on a given date
    pub async fn find_by_vehicle_and_date(&self, vehicle_id: i64, route_date: NaiveDate) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE vehicle_id = $1 AND route_date = $2")
            .bind(vehicle_id)
            .bind(route_date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(route)
    }

    pub async fn drivers(&self, route_id: i64) -> Result<Vec<RouteDriver>, AppError> {
        let drivers = sqlx::query_as::<_, RouteDriver>(
            r#"
            SELECT rd.route_id, u.id AS user_id, u.username, u.first_name, u.last_name
            FROM route_drivers rd
            JOIN users u ON u.id = rd.user_id
            WHERE rd.route_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(drivers)
    }

    /// Insert a route with its drivers and stops in one transaction
    pub async fn create(
        &self,
        definition_id: i64,
        vehicle_id: i64,
        route_date: NaiveDate,
        driver_ids: &[i64],
        stops: &[NewStopRequest],
    ) -> Result<Route, AppError> {
        let mut tx = self.pool.begin().await?;

        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (definition_id, vehicle_id, route_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(definition_id)
        .bind(vehicle_id)
        .bind(route_date)
        .fetch_one(&mut *tx)
        .await?;

        replace_drivers(&mut tx, route.id, driver_ids).await?;

        for (position, stop) in stops.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO stops (route_id, site_id, sequence, is_priority)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(route.id)
            .bind(stop.site_id)
            .bind(stop.sequence.unwrap_or(position as i32 + 1))
            .bind(stop.is_priority)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(route)
    }

    /// Update a route; `driver_ids` replaces the driver list when given
    pub async fn update(&self, route: &Route, driver_ids: Option<&[i64]>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE routes SET definition_id = $2, vehicle_id = $3, route_date = $4 WHERE id = $1")
            .bind(route.id)
            .bind(route.definition_id)
            .bind(route.vehicle_id)
            .bind(route.route_date)
            .execute(&mut *tx)
            .await?;

        if let Some(driver_ids) = driver_ids {
            replace_drivers(&mut tx, route.id, driver_ids).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Stops and their collections go with the route; a recorded daily log blocks the delete
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

async fn replace_drivers(conn: &mut PgConnection, route_id: i64, driver_ids: &[i64]) -> Result<(), AppError> {
    sqlx::query("DELETE FROM route_drivers WHERE route_id = $1")
        .bind(route_id)
        .execute(&mut *conn)
        .await?;

    if !driver_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO route_drivers (route_id, user_id)
            SELECT $1, UNNEST($2::bigint[])
            "#,
        )
        .bind(route_id)
        .bind(driver_ids)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
