use sqlx::PgPool;

use crate::dto::collection_dto::{CollectionFilters, CollectionResponse};
use crate::repositories::collection_repository::CollectionRepository;
use crate::utils::errors::{not_found_error, AppError};

/// Read access to recorded collections
pub struct CollectionController {
    repository: CollectionRepository,
}

impl CollectionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CollectionRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: &CollectionFilters) -> Result<Vec<CollectionResponse>, AppError> {
        let collections = self.repository.list(filters.route_id).await?;
        Ok(collections.into_iter().map(CollectionResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<CollectionResponse, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(CollectionResponse::from)
            .ok_or_else(|| not_found_error("Collection", id))
    }
}
