/// Errors from the upstream gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No credential configured for the gateway.
    #[error("AI_GATEWAY_API_KEY not configured")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("AI Gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("AI Gateway error: {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnosis.
        body: String,
    },

    /// A success response whose body is not JSON.
    #[error("Malformed AI response")]
    MalformedResponse(#[source] serde_json::Error),

    /// A success response without an image at the expected path.
    #[error("No image URL in AI response")]
    MissingImageUrl,
}
