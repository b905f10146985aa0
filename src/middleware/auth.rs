//! JWT authentication middleware
//!
//! Resolves the bearer token to an active user and injects it into the
//! request extensions for the handlers.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    repositories::user_repository::UserRepository,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Caller resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub is_staff: bool,
}

/// Any active user
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)?;
    let user = authenticate(&state, &token).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Active staff members only
pub async fn require_staff(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)?;
    let user = authenticate(&state, &token).await?;
    if !user.is_staff {
        return Err(AppError::Forbidden("Staff permissions are required".to_string()));
    }
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Result<String, AppError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    Ok(extract_token_from_header(header_value)?.to_string())
}

async fn authenticate(state: &AppState, token: &str) -> Result<AuthenticatedUser, AppError> {
    let claims = verify_token(token, &state.jwt)?;

    // Staff status and activity are read from the database, not trusted from the token
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("User is inactive".to_string()));
    }

    Ok(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        is_staff: user.is_staff,
    })
}
