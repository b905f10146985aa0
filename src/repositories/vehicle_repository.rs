use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, active: Option<bool>) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::boolean IS NULL OR is_active = $1)
            ORDER BY nickname, registration_number
            "#,
        )
        .bind(active)
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }

    pub async fn registration_exists(&self, registration_number: &str, except_id: Option<i64>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE UPPER(registration_number) = UPPER($1)
                AND ($2::bigint IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(registration_number)
        .bind(except_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(result.0)
    }

    pub async fn create(&self, registration_number: &str, nickname: &str, is_active: bool) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (registration_number, nickname, is_active)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(registration_number)
        .bind(nickname)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(vehicle)
    }

    pub async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET registration_number = $2, nickname = $3, is_active = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.registration_number)
        .bind(&vehicle.nickname)
        .bind(vehicle.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
