//! Request/response schemas for the account and profile API.
//!
//! Each schema validates a raw JSON payload into a typed value, collecting
//! an error for every failing field, and shapes the typed value back into
//! JSON for responses. Write-only fields never appear in the output.

pub mod auth;
pub mod email;
pub mod enums;
pub mod error;
pub mod fields;
pub mod profile;

use serde::Serialize;
use serde_json::Value;

pub use auth::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
pub use enums::{InvalidChoice, Role};
pub use error::{ValidationError, NON_FIELD_ERRORS};
pub use profile::{PatientProfile, ProviderProfile};

/// A declared payload shape for one API operation.
pub trait Schema: Serialize + Sized {
    /// Short name used in logs and by the payload CLI.
    const NAME: &'static str;

    /// Validate a raw payload, reporting every failing field.
    fn validate(data: &Value) -> Result<Self, ValidationError>;

    /// Output representation.
    fn to_representation(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Names accepted by [`validate_named`], in display order.
pub const SCHEMA_NAMES: &[&str] = &[
    RegisterRequest::NAME,
    LoginRequest::NAME,
    UserResponse::NAME,
    TokenResponse::NAME,
    PatientProfile::NAME,
    ProviderProfile::NAME,
];

/// Validate `data` against the schema called `name` and return its
/// representation. `None` if no schema has that name.
pub fn validate_named(name: &str, data: &Value) -> Option<Result<Value, ValidationError>> {
    fn run<S: Schema>(data: &Value) -> Result<Value, ValidationError> {
        let value = S::validate(data)?;
        value
            .to_representation()
            .map_err(|e| ValidationError::non_field(e.to_string()))
    }

    let result = match name {
        "register" => run::<RegisterRequest>(data),
        "login" => run::<LoginRequest>(data),
        "user" => run::<UserResponse>(data),
        "token" => run::<TokenResponse>(data),
        "patient" => run::<PatientProfile>(data),
        "provider" => run::<ProviderProfile>(data),
        _ => return None,
    };
    Some(result)
}
