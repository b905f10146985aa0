use sqlx::PgPool;
use validator::Validate;

use crate::dto::route_definition_dto::{CreateRouteDefinitionRequest, UpdateRouteDefinitionRequest};
use crate::models::route_definition::RouteDefinition;
use crate::repositories::route_definition_repository::RouteDefinitionRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct RouteDefinitionController {
    repository: RouteDefinitionRepository,
}

impl RouteDefinitionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteDefinitionRepository::new(pool),
        }
    }

    pub async fn list(&self, active: Option<bool>) -> Result<Vec<RouteDefinition>, AppError> {
        self.repository.list(active).await
    }

    pub async fn get(&self, id: i64) -> Result<RouteDefinition, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Route definition", id))
    }

    pub async fn create(&self, request: CreateRouteDefinitionRequest) -> Result<RouteDefinition, AppError> {
        request.validate()?;
        self.repository.create(request.name.trim(), request.is_active).await
    }

    pub async fn update(&self, id: i64, request: UpdateRouteDefinitionRequest) -> Result<RouteDefinition, AppError> {
        request.validate()?;
        let current = self.get(id).await?;
        let merged = RouteDefinition {
            id,
            name: request.name.map(|s| s.trim().to_string()).unwrap_or(current.name),
            is_active: request.is_active.unwrap_or(current.is_active),
        };
        self.repository.update(&merged).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Route definition", id));
        }
        Ok(())
    }
}
