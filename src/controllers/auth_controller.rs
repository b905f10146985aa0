use bcrypt::verify;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::user_dto::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login and identity of the calling user
pub struct AuthController {
    users: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, request: LoginRequest, jwt: &JwtConfig) -> Result<LoginResponse, AppError> {
        let username = request.username.trim();
        let Some(user) = self.users.find_by_username(username).await? else {
            warn!("Login attempt for unknown user {}", username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let password_hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify(request.password, &password_hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !valid {
            warn!("Failed login for user {}", user.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        if !user.is_active {
            return Err(AppError::Forbidden("This account is disabled".to_string()));
        }

        let (token, expires_at) = generate_token(user.id, &user.username, user.is_staff, jwt)?;
        info!("User {} logged in", user.username);

        Ok(LoginResponse {
            token,
            token_type: "Bearer",
            expires_at,
            user: user.into(),
        })
    }

    pub async fn me(&self, user_id: i64) -> Result<UserResponse, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| not_found_error("User", user_id))
    }
}
