use sqlx::PgPool;
use validator::Validate;

use crate::dto::customer_dto::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::models::customer::Customer;
use crate::repositories::customer_repository::CustomerRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct CustomerController {
    repository: CustomerRepository,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        self.repository.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Customer, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", id))
    }

    pub async fn create(&self, request: CreateCustomerRequest) -> Result<Customer, AppError> {
        request.validate()?;
        self.repository
            .create(
                request.name.trim(),
                request.contact_person.trim(),
                request.contact_email.trim(),
                request.contact_phone.trim(),
            )
            .await
    }

    pub async fn update(&self, id: i64, request: UpdateCustomerRequest) -> Result<Customer, AppError> {
        request.validate()?;
        let current = self.get(id).await?;

        let merged = Customer {
            id,
            name: request.name.map(|s| s.trim().to_string()).unwrap_or(current.name),
            contact_person: request.contact_person.unwrap_or(current.contact_person),
            contact_email: request.contact_email.map(|s| s.trim().to_string()).unwrap_or(current.contact_email),
            contact_phone: request.contact_phone.unwrap_or(current.contact_phone),
        };
        self.repository.update(&merged).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Customer", id));
        }
        Ok(())
    }
}
