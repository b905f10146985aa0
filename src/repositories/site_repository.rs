use crate::models::site::Site;
use crate::utils::errors::AppError;
use sqlx::PgPool;

const SITE_SELECT: &str = r#"
    SELECT s.id, s.customer_id, c.name AS customer_name, s.default_route_id,
           s.address_line_1, s.address_line_2, s.city, s.postcode
    FROM sites s
    JOIN customers c ON c.id = s.customer_id
"#;

pub struct SiteRepository {
    pool: PgPool,
}

impl SiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, customer_id: Option<i64>) -> Result<Vec<Site>, AppError> {
        let sql = format!(
            "{} WHERE ($1::bigint IS NULL OR s.customer_id = $1) ORDER BY c.name, s.postcode, s.id",
            SITE_SELECT
        );
        let sites = sqlx::query_as::<_, Site>(&sql)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(sites)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Site>, AppError> {
        let sql = format!("{} WHERE s.id = $1", SITE_SELECT);
        let site = sqlx::query_as::<_, Site>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(site)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sites WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(result.0)
    }

    pub async fn create(
        &self,
        customer_id: i64,
        default_route_id: Option<i64>,
        address_line_1: &str,
        address_line_2: &str,
        city: &str,
        postcode: &str,
    ) -> Result<Site, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO sites (customer_id, default_route_id, address_line_1, address_line_2, city, postcode)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(customer_id)
        .bind(default_route_id)
        .bind(address_line_1)
        .bind(address_line_2)
        .bind(city)
        .bind(postcode)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Site {} vanished after insert", id)))
    }

    pub async fn update(&self, site: &Site) -> Result<Site, AppError> {
        sqlx::query(
            r#"
            UPDATE sites
            SET customer_id = $2, default_route_id = $3, address_line_1 = $4,
                address_line_2 = $5, city = $6, postcode = $7
            WHERE id = $1
            "#,
        )
        .bind(site.id)
        .bind(site.customer_id)
        .bind(site.default_route_id)
        .bind(&site.address_line_1)
        .bind(&site.address_line_2)
        .bind(&site.city)
        .bind(&site.postcode)
        .execute(&self.pool)
        .await?;

        self.find_by_id(site.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Site {} not found", site.id)))
    }

    /// Sites still visited by a stop cannot be deleted
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
