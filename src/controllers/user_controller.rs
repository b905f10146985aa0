use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::user_dto::{CreateUserRequest, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<UserResponse, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| not_found_error("User", id))
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<UserResponse, AppError> {
        request.validate()?;
        let username = request.username.trim().to_string();

        if self.repository.username_exists(&username).await? {
            return Err(AppError::Conflict(format!("Username '{}' is already taken", username)));
        }

        let password_hash = hash_password(request.password).await?;
        let user = self
            .repository
            .create(
                &username,
                &password_hash,
                request.first_name.trim(),
                request.last_name.trim(),
                request.email.as_deref().map(str::trim).unwrap_or(""),
                request.is_staff,
            )
            .await?;

        info!("User {} created (staff: {})", user.username, user.is_staff);
        Ok(user.into())
    }
}

/// bcrypt is CPU bound, so it runs off the async workers
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}
