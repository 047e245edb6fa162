//! Patient and provider profile endpoints.
//!
//! `GET|PUT /api/patients/:user_id/profile`
//! `GET|PUT /api/providers/:user_id/profile`
//!
//! On `PUT`, the body's `user_id` must match the path.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::extract::Validated;
use crate::api::types::ApiContext;
use crate::schemas::{PatientProfile, ProviderProfile};

fn ensure_same_user(path_user_id: &str, body_user_id: &str) -> Result<(), ApiError> {
    if path_user_id != body_user_id {
        return Err(ApiError::BadRequest(format!(
            "user_id in body ({body_user_id}) does not match path ({path_user_id})"
        )));
    }
    Ok(())
}

/// `GET /api/patients/:user_id/profile`
pub async fn get_patient(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<PatientProfile>, ApiError> {
    Ok(Json(ctx.backend.patient_profile(&user_id)?))
}

/// `PUT /api/patients/:user_id/profile`
pub async fn put_patient(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
    Validated(profile): Validated<PatientProfile>,
) -> Result<Json<PatientProfile>, ApiError> {
    ensure_same_user(&user_id, &profile.user_id)?;
    let saved = ctx.backend.save_patient_profile(profile)?;
    tracing::info!(%user_id, "Patient profile saved");
    Ok(Json(saved))
}

/// `GET /api/providers/:user_id/profile`
pub async fn get_provider(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<ProviderProfile>, ApiError> {
    Ok(Json(ctx.backend.provider_profile(&user_id)?))
}

/// `PUT /api/providers/:user_id/profile`
pub async fn put_provider(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
    Validated(profile): Validated<ProviderProfile>,
) -> Result<Json<ProviderProfile>, ApiError> {
    ensure_same_user(&user_id, &profile.user_id)?;
    let saved = ctx.backend.save_provider_profile(profile)?;
    tracing::info!(%user_id, specialty = %saved.specialty, "Provider profile saved");
    Ok(Json(saved))
}
