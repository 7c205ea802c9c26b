//! Calls to the generation proxy.

use pixmorph_core::generation::{GenerationRequest, GenerationResponse};
use serde::Deserialize;

use crate::error::ClientError;
use crate::session::Session;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Pull the status and a displayable message out of a non-success response.
///
/// Prefers the `error` field of the API's JSON envelope and falls back to
/// the raw body text.
pub(crate) async fn failure_parts(response: reqwest::Response) -> (u16, String) {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                text
            }
        });
    (status.as_u16(), message)
}

/// HTTP client for `POST /api/v1/generate-image`.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ProxyClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/v1/generate-image", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one generation request and return the generated image URL.
    ///
    /// The request is validated first; an invalid request never reaches the
    /// network. The caller's token is attached when a session is given.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        session: Option<&Session>,
    ) -> Result<String, ClientError> {
        request.validate()?;

        let mut builder = self.http.post(&self.endpoint).json(request);
        if let Some(session) = session {
            builder = builder.bearer_auth(&session.access_token);
        }

        tracing::debug!(images = request.images.len(), "Dispatching generation request");
        let response = builder.send().await?;

        if !response.status().is_success() {
            let (status, message) = failure_parts(response).await;
            tracing::warn!(status, message = %message, "Generation request failed");
            return Err(ClientError::Proxy { status, message });
        }

        let body: serde_json::Value = response.json().await?;
        match serde_json::from_value::<GenerationResponse>(body) {
            Ok(GenerationResponse { image_url }) if !image_url.is_empty() => Ok(image_url),
            _ => Err(ClientError::MissingImageUrl),
        }
    }
}
