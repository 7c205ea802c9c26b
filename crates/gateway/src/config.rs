use std::time::Duration;

/// Default chat-completions endpoint of the AI gateway.
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";

/// Default image-capable model.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash-image-preview";

/// Default upstream timeout. Image generation regularly takes 10-30 s.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Upstream gateway settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bearer credential. `None` is not fatal at startup; every generation
    /// request then fails with a configuration error.
    pub api_key: Option<String>,
    pub url: String,
    pub model: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `AI_GATEWAY_API_KEY`      | --                      |
    /// | `AI_GATEWAY_URL`          | [`DEFAULT_GATEWAY_URL`] |
    /// | `AI_GATEWAY_MODEL`        | [`DEFAULT_MODEL`]       |
    /// | `AI_GATEWAY_TIMEOUT_SECS` | `120`                   |
    pub fn from_env() -> Self {
        let api_key = std::env::var("AI_GATEWAY_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let url = std::env::var("AI_GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.into());
        let model = std::env::var("AI_GATEWAY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("AI_GATEWAY_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("AI_GATEWAY_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            url,
            model,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Configuration pointing at `url` with the given key and defaults
    /// for everything else.
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_key,
            url: url.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
