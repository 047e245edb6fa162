use std::net::{Ipv4Addr, SocketAddr};

/// Application-level constants
pub const APP_NAME: &str = "clinic-api";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Message attached to a token response when none is given
pub const DEFAULT_LOGIN_MESSAGE: &str = "Login successful";

/// Default request body limit (1 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Default port for the HTTP API
pub const DEFAULT_PORT: u16 = 8000;

const ADDR_ENV: &str = "CLINIC_API_ADDR";
const MAX_BODY_ENV: &str = "CLINIC_API_MAX_BODY_BYTES";

/// Log filter used when `RUST_LOG` is not set
pub fn default_log_filter() -> &'static str {
    "clinic_api=info"
}

/// Runtime settings for the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ApiConfig {
    /// Build settings from a key lookup such as
    /// `|key| std::env::var(key).ok()`.
    ///
    /// Unparseable values are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup(ADDR_ENV) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, "Ignoring invalid {ADDR_ENV}: {e}");
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let max_body_bytes = match lookup(MAX_BODY_ENV) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(value = %raw, "Ignoring invalid {MAX_BODY_ENV}");
                    defaults.max_body_bytes
                }
            },
            None => defaults.max_body_bytes,
        };

        Self {
            bind_addr,
            max_body_bytes,
        }
    }
}
