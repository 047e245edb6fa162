//! API endpoint handlers.
//!
//! Each module binds one group of schemas to its routes. Handlers
//! validate through `Validated<T>` and delegate to the `Backend`.

pub mod auth;
pub mod health;
pub mod profiles;
