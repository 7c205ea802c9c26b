//! Save a generated image to disk.

use std::path::{Path, PathBuf};

use chrono::Utc;
use pixmorph_core::data_url;

use crate::error::ClientError;

/// `generated-image-<unix millis>.png`
pub fn download_file_name() -> String {
    format!("generated-image-{}.png", Utc::now().timestamp_millis())
}

/// Fetch `image_url` and write it into `dir`, returning the written path.
///
/// Accepts both `http(s)` URLs and `data:` URLs, which the upstream model
/// sometimes returns inline.
pub async fn download_image(
    http: &reqwest::Client,
    image_url: &str,
    dir: &Path,
) -> Result<PathBuf, ClientError> {
    let bytes = if image_url.starts_with("data:") {
        data_url::decode(image_url)?.1
    } else {
        let response = http.get(image_url).send().await?.error_for_status()?;
        response.bytes().await?.to_vec()
    };

    let path = dir.join(download_file_name());
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|source| ClientError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Image downloaded");
    Ok(path)
}
