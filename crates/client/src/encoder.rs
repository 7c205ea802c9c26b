//! Turn selected images into `data:` URLs for the generation proxy.
//!
//! Images are read concurrently. The output order always matches the
//! selection order, and the first failed read aborts the whole batch.

use futures::future::try_join_all;
use pixmorph_core::data_url;
use pixmorph_core::selection::{ImageSource, SelectedImage};

use crate::error::ClientError;

/// Encode one image as `data:<mime>;base64,<payload>`.
pub async fn encode_image(image: &SelectedImage) -> Result<String, ClientError> {
    match &image.source {
        ImageSource::Memory(bytes) => Ok(data_url::encode(&image.mime_type, bytes)),
        ImageSource::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| ClientError::Read {
                    name: image.name.clone(),
                    source,
                })?;
            tracing::debug!(name = %image.name, bytes = bytes.len(), "Encoded image");
            Ok(data_url::encode(&image.mime_type, &bytes))
        }
    }
}

/// Encode every image, preserving order.
pub async fn encode_all(images: &[SelectedImage]) -> Result<Vec<String>, ClientError> {
    try_join_all(images.iter().map(encode_image)).await
}
