use std::path::PathBuf;

use pixmorph_core::error::CoreError;

/// Everything a client-side flow can fail with.
///
/// Every variant renders a message fit to show to the user as-is.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Input rejected before any network call was made.
    #[error("{0}")]
    Validation(String),

    /// A selected image could not be read from disk.
    #[error("Failed to read image {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The generation proxy answered with a non-success status.
    #[error("Failed to generate image ({status}): {message}")]
    Proxy { status: u16, message: String },

    /// The proxy answered 200 without an `imageUrl`.
    #[error("No image URL returned")]
    MissingImageUrl,

    /// A history call answered with a non-success status.
    #[error("History request failed ({status}): {message}")]
    History { status: u16, message: String },

    /// The view was torn down before the request finished.
    #[error("Request cancelled")]
    Cancelled,

    /// No signed-in session where one is required.
    #[error("You must be signed in")]
    NotSignedIn,

    /// The access token could not be decoded.
    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    /// Transport-level failure talking to the API.
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    /// Writing a downloaded image failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ClientError::Validation(msg),
            other => ClientError::Validation(other.to_string()),
        }
    }
}
