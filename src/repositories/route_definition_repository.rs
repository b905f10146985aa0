use crate::models::route_definition::RouteDefinition;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct RouteDefinitionRepository {
    pool: PgPool,
}

impl RouteDefinitionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, active: Option<bool>) -> Result<Vec<RouteDefinition>, AppError> {
        let definitions = sqlx::query_as::<_, RouteDefinition>(
            r#"
            SELECT * FROM route_definitions
            WHERE ($1::boolean IS NULL OR is_active = $1)
            ORDER BY name
            "#,
        )
        .bind(active)
        .fetch_all(&self.pool)
        .await?;
        Ok(definitions)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<RouteDefinition>, AppError> {
        let definition = sqlx::query_as::<_, RouteDefinition>("SELECT * FROM route_definitions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(definition)
    }

    pub async fn create(&self, name: &str, is_active: bool) -> Result<RouteDefinition, AppError> {
        let definition = sqlx::query_as::<_, RouteDefinition>(
            "INSERT INTO route_definitions (name, is_active) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(definition)
    }

    pub async fn update(&self, definition: &RouteDefinition) -> Result<RouteDefinition, AppError> {
        let updated = sqlx::query_as::<_, RouteDefinition>(
            "UPDATE route_definitions SET name = $2, is_active = $3 WHERE id = $1 RETURNING *",
        )
        .bind(definition.id)
        .bind(&definition.name)
        .bind(definition.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Sites using this definition as their default route are detached by
    /// the foreign key; routes still referencing it block the delete
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM route_definitions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
