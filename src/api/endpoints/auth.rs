//! Account endpoints.
//!
//! `POST /api/auth/register` — signup, returns the created user
//! `POST /api/auth/login` — credential check, returns a token

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::extract::Validated;
use crate::api::types::ApiContext;
use crate::schemas::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};

/// `POST /api/auth/register` — create an account.
///
/// Responds `201` with the user record. The password is handed to the
/// backend and never echoed.
pub async fn register(
    State(ctx): State<ApiContext>,
    Validated(request): Validated<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = ctx.backend.register(request)?;
    tracing::info!(user_id = %user.id, role = %user.role, "Account registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/auth/login` — exchange credentials for a token.
pub async fn login(
    State(ctx): State<ApiContext>,
    Validated(request): Validated<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = ctx.backend.login(request).map_err(|e| {
        tracing::info!("Login rejected: {e}");
        ApiError::from(e)
    })?;

    Ok(Json(token))
}
