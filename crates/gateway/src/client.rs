//! HTTP client for the gateway's chat-completions endpoint.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::payload::{extract_image_url, ChatRequest};

/// Shared, cheaply cloneable gateway client.
///
/// Holds no per-request state: every call to [`GatewayClient::generate`]
/// is one independent upstream round-trip with no retry.
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayClient {
    /// Create a client with a pre-configured HTTP timeout.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Generate one image from `images` and `prompt`, returning its URL.
    ///
    /// Fails with [`GatewayError::MissingApiKey`] before any network call
    /// when no credential is configured.
    pub async fn generate(&self, images: &[String], prompt: &str) -> Result<String, GatewayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingApiKey)?;

        let body = ChatRequest::for_generation(&self.config.model, prompt, images);

        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        let data: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(GatewayError::MalformedResponse)?;
        tracing::debug!("AI gateway response received");

        extract_image_url(&data).ok_or(GatewayError::MissingImageUrl)
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or an
    /// [`GatewayError::Api`] with the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(status = status.as_u16(), body = %body, "AI gateway error");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
