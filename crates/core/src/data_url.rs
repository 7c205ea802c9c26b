//! `data:` URL encoding, decoding and image MIME detection.

use base64::Engine;

use crate::error::CoreError;

/// Parsed metadata from the part of a data URL before the first comma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrlHeader {
    pub mime_type: String,
    pub is_base64: bool,
}

/// Build a base64 data URL for `bytes`.
pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime_type};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Parse the header of a data URL without touching the payload.
pub fn parse_header(url: &str) -> Result<DataUrlHeader, CoreError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| CoreError::Validation("Not a data URL".to_string()))?;
    let (meta, _) = rest
        .split_once(',')
        .ok_or_else(|| CoreError::Validation("Data URL has no payload".to_string()))?;

    let mut parts = meta.split(';');
    let mime_type = match parts.next().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_ascii_lowercase(),
        _ => "text/plain".to_string(),
    };
    let is_base64 = parts.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    Ok(DataUrlHeader {
        mime_type,
        is_base64,
    })
}

/// Decode a data URL into its MIME type and raw bytes.
///
/// Whitespace inside the payload and missing `=` padding are tolerated.
/// Non-base64 payloads are returned as their literal bytes.
pub fn decode(url: &str) -> Result<(String, Vec<u8>), CoreError> {
    let header = parse_header(url)?;
    // parse_header guarantees a comma is present.
    let payload = url.split_once(',').map(|(_, p)| p).unwrap_or_default();

    if !header.is_base64 {
        return Ok((header.mime_type, payload.as_bytes().to_vec()));
    }

    let cleaned: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&cleaned)
        .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(&cleaned))
        .map_err(|e| CoreError::Validation(format!("Invalid base64 payload: {e}")))?;

    Ok((header.mime_type, bytes))
}

/// Detect an image MIME type from the leading bytes of a file.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
        Some("image/tiff")
    } else if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        match &bytes[8..12] {
            b"avif" | b"avis" => Some("image/avif"),
            b"heic" | b"heix" | b"mif1" => Some("image/heic"),
            _ => None,
        }
    } else {
        None
    }
}

/// Map a file extension (without the dot, any case) to an image MIME type.
pub fn mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "avif" => Some("image/avif"),
        "heic" | "heif" => Some("image/heic"),
        _ => None,
    }
}

/// `true` for any `image/*` MIME type.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.to_ascii_lowercase().starts_with("image/")
}
