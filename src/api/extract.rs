//! `Validated<T>` — JSON body extractor that runs a schema.
//!
//! Malformed JSON is a `400 BAD_REQUEST`; a well-formed body that fails
//! the schema is a `400 VALIDATION_FAILED` carrying every field error.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::schemas::Schema;

/// A request body validated against schema `T`.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Schema + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(rejection_to_api)?;

        T::validate(&value).map(Validated).map_err(ApiError::Validation)
    }
}

fn rejection_to_api(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge;
    }
    ApiError::BadRequest(rejection.body_text())
}
