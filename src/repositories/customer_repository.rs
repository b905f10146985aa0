use crate::models::customer::Customer;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    pub async fn create(
        &self,
        name: &str,
        contact_person: &str,
        contact_email: &str,
        contact_phone: &str,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, contact_person, contact_email, contact_phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(contact_person)
        .bind(contact_email)
        .bind(contact_phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(customer)
    }

    pub async fn update(&self, customer: &Customer) -> Result<Customer, AppError> {
        let updated = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $2, contact_person = $3, contact_email = $4, contact_phone = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.contact_person)
        .bind(&customer.contact_email)
        .bind(&customer.contact_phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Deletes the customer and, through the foreign key, its sites
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
