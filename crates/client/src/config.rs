use std::time::Duration;

/// Base URL of a locally running `pixmorph-api`.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Client settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API server, without the `/api/v1` prefix.
    pub api_url: String,
    /// Access token of the signed-in user, if any.
    pub access_token: Option<String>,
    /// Whole-request timeout for calls to the API server.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default             |
    /// |-------------------------|---------------------|
    /// | `PIXMORPH_API_URL`      | [`DEFAULT_API_URL`] |
    /// | `PIXMORPH_ACCESS_TOKEN` | --                  |
    /// | `PIXMORPH_TIMEOUT_SECS` | `180`               |
    ///
    /// # Panics
    ///
    /// Panics if `PIXMORPH_TIMEOUT_SECS` is set but is not a valid `u64`.
    pub fn from_env() -> Self {
        let api_url = std::env::var("PIXMORPH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let access_token = std::env::var("PIXMORPH_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let timeout_secs: u64 = std::env::var("PIXMORPH_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("PIXMORPH_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            access_token,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Build the shared HTTP client used by every API call.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().timeout(self.timeout).build()
    }
}
