//! Account schemas: registration, login, user output, token output.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::Role;
use super::error::ValidationError;
use super::fields::Fields;
use super::Schema;
use crate::config::{DEFAULT_LOGIN_MESSAGE, MIN_PASSWORD_LENGTH};

/// Signup payload. `password` is write-only.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub consent_given: bool,
}

impl Schema for RegisterRequest {
    const NAME: &'static str = "register";

    fn validate(data: &Value) -> Result<Self, ValidationError> {
        let mut fields = Fields::new(Self::NAME, data)?;
        let email = fields.email("email");
        let password = fields.string_min_length("password", MIN_PASSWORD_LENGTH);
        let role = fields.choice("role", Role::default());
        let consent_given = fields.boolean("consent_given", false);
        fields.finish()?;

        Ok(Self {
            email,
            password,
            role,
            consent_given,
        })
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("consent_given", &self.consent_given)
            .finish()
    }
}

/// Login payload. `password` is write-only.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl Schema for LoginRequest {
    const NAME: &'static str = "login";

    fn validate(data: &Value) -> Result<Self, ValidationError> {
        let mut fields = Fields::new(Self::NAME, data)?;
        let email = fields.email("email");
        let password = fields.string("password");
        fields.finish()?;

        Ok(Self { email, password })
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A user record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Schema for UserResponse {
    const NAME: &'static str = "user";

    fn validate(data: &Value) -> Result<Self, ValidationError> {
        let mut fields = Fields::new(Self::NAME, data)?;
        let id = fields.string("id");
        let email = fields.email("email");
        let role = fields.string("role");
        let created_at = fields.datetime("created_at");
        fields.finish()?;

        Ok(Self {
            id,
            email,
            role,
            created_at,
        })
    }
}

/// Response body for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub role: String,
    pub message: String,
}

impl TokenResponse {
    /// Token response carrying the default confirmation message.
    pub fn new(token: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            role: role.into(),
            message: DEFAULT_LOGIN_MESSAGE.to_string(),
        }
    }
}

impl Schema for TokenResponse {
    const NAME: &'static str = "token";

    fn validate(data: &Value) -> Result<Self, ValidationError> {
        let mut fields = Fields::new(Self::NAME, data)?;
        let token = fields.string("token");
        let role = fields.string("role");
        let message = fields.optional_string_or("message", DEFAULT_LOGIN_MESSAGE);
        fields.finish()?;

        Ok(Self {
            token,
            role,
            message,
        })
    }
}
