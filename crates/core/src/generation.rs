//! Generation request/response shapes and their validation rules.
//!
//! The same [`GenerationRequest`] type is deserialized by the proxy and
//! serialized by the client dispatcher, so both sides agree on the wire
//! format and on what counts as a valid request.

use serde::{Deserialize, Serialize};

use crate::data_url;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Minimum number of images in a generation request.
pub const MIN_IMAGES: usize = 1;

/// Maximum number of images in a generation request.
pub const MAX_IMAGES: usize = 4;

/// The color-grading flow works on exactly one image.
pub const GRADING_IMAGES: usize = 1;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/generate-image`.
///
/// Both fields default to empty so that a body missing either one is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Ordered image references, normally `data:image/...;base64,` URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Instruction text, sent to the upstream model inside the template.
    #[serde(default)]
    pub prompt: String,
}

/// Successful proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl GenerationRequest {
    pub fn new(images: Vec<String>, prompt: impl Into<String>) -> Self {
        Self {
            images,
            prompt: prompt.into(),
        }
    }

    /// Check the request before any network call is made.
    ///
    /// - `images` must hold between [`MIN_IMAGES`] and [`MAX_IMAGES`] entries.
    /// - `prompt` must not be blank.
    /// - Every image must be an `image/*` data URL or an `http(s)` URL.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.images.is_empty() || is_blank_prompt(&self.prompt) {
            return Err(CoreError::Validation(
                "Missing images array or prompt".to_string(),
            ));
        }
        validate_image_count(self.images.len(), MAX_IMAGES)?;
        for (index, image) in self.images.iter().enumerate() {
            validate_image_reference(image).map_err(|e| match e {
                CoreError::Validation(msg) => {
                    CoreError::Validation(format!("Image {}: {msg}", index + 1))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// Validate a request for the color-grading flow (exactly one image).
    pub fn validate_for_grading(&self) -> Result<(), CoreError> {
        if self.images.len() != GRADING_IMAGES {
            return Err(CoreError::Validation(format!(
                "Color grading takes exactly {GRADING_IMAGES} image, got {}",
                self.images.len()
            )));
        }
        self.validate()
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// A prompt is blank when nothing but whitespace remains.
pub fn is_blank_prompt(prompt: &str) -> bool {
    prompt.trim().is_empty()
}

/// Validate an image count against `[MIN_IMAGES, max]`.
pub fn validate_image_count(count: usize, max: usize) -> Result<(), CoreError> {
    if count < MIN_IMAGES {
        return Err(CoreError::Validation(
            "At least one image is required".to_string(),
        ));
    }
    if count > max {
        return Err(CoreError::Validation(format!(
            "Too many images: {count} (max {max})"
        )));
    }
    Ok(())
}

/// Accept `data:image/*` URLs and remote `http(s)` URLs.
pub fn validate_image_reference(reference: &str) -> Result<(), CoreError> {
    if reference.starts_with("https://") || reference.starts_with("http://") {
        return Ok(());
    }
    let header = data_url::parse_header(reference)?;
    if !header.mime_type.starts_with("image/") {
        return Err(CoreError::Validation(format!(
            "Unsupported media type '{}'",
            header.mime_type
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
