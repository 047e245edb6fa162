//! Shared types for the API layer: request context and the backend seam.

use std::sync::Arc;

use crate::schemas::{
    LoginRequest, PatientProfile, ProviderProfile, RegisterRequest, TokenResponse, UserResponse,
};

// ═══════════════════════════════════════════════════════════
// Backend — account and profile operations behind the API
// ═══════════════════════════════════════════════════════════

/// Failures reported by a [`Backend`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Backend failure: {0}")]
    Internal(String),
}

/// Account and profile operations the HTTP handlers delegate to.
///
/// Handlers only ever pass validated schema values in, and return
/// whatever the backend hands back. Credential checks, password storage,
/// token issuance and persistence all live behind this trait.
pub trait Backend: Send + Sync + 'static {
    /// Create an account.
    fn register(&self, request: RegisterRequest) -> Result<UserResponse, BackendError>;

    /// Check credentials and issue a token.
    fn login(&self, request: LoginRequest) -> Result<TokenResponse, BackendError>;

    fn patient_profile(&self, user_id: &str) -> Result<PatientProfile, BackendError>;

    fn save_patient_profile(&self, profile: PatientProfile) -> Result<PatientProfile, BackendError>;

    fn provider_profile(&self, user_id: &str) -> Result<ProviderProfile, BackendError>;

    fn save_provider_profile(
        &self,
        profile: ProviderProfile,
    ) -> Result<ProviderProfile, BackendError>;
}

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub backend: Arc<dyn Backend>,
}

impl ApiContext {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}
