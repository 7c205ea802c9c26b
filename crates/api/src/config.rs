use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Default whole-request timeout. Longer than the gateway's default so a
/// slow upstream is reported by the gateway client, not cut off here.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 150;

/// Default request body limit (32 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `150`). Must exceed the
    /// upstream gateway timeout, see [`ServerConfig::check_upstream_timeout`].
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes (default: 32 MiB). Four
    /// base64-encoded photos easily exceed axum's 2 MiB default.
    pub max_body_bytes: usize,
    /// Session token validation settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `150`                      |
    /// | `MAX_BODY_BYTES`       | `33554432`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_BODY_BYTES.to_string())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            jwt,
        }
    }

    /// Reject a request timeout that would fire before the upstream
    /// gateway's own timeout, which would hide `UPSTREAM_TIMEOUT` errors.
    pub fn check_upstream_timeout(&self, upstream: Duration) -> Result<(), String> {
        if Duration::from_secs(self.request_timeout_secs) <= upstream {
            return Err(format!(
                "REQUEST_TIMEOUT_SECS ({}) must exceed AI_GATEWAY_TIMEOUT_SECS ({})",
                self.request_timeout_secs,
                upstream.as_secs()
            ));
        }
        Ok(())
    }
}
