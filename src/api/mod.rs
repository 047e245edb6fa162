//! HTTP API for accounts and profiles.
//!
//! Binds each schema to its route through the `Validated<T>` extractor
//! and delegates to a `Backend`. Routes are nested under `/api/`.
//!
//! The router is composable — `api_router()` returns a `Router` that can
//! be mounted on any axum server instance, and `start_api_server()` runs
//! it standalone.

pub mod endpoints;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use extract::Validated;
pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession};
pub use types::{ApiContext, Backend, BackendError};
