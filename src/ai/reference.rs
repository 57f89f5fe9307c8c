//! Reference product image handling.
//!
//! A reference image arrives from the form as a base64 data URI. Only a
//! small set of MIME types is accepted; anything else is rejected so the
//! acquirer can proceed without the reference instead of failing.

use crate::{Error, Result};
use base64::Engine as _;

const SUPPORTED_MIME_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/webp"];

/// A validated reference image ready to attach to an image-generation call.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub mime_type: String,
    /// Base64 payload without the data-URI header.
    pub data: String,
}

/// Parse and validate a `data:<mime>;base64,<payload>` URI.
pub fn parse_data_uri(uri: &str) -> Result<ReferenceImage> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| Error::ImageFormat("Reference image is not a data URI".to_string()))?;

    let (header, data) = rest.split_once(',').ok_or_else(|| {
        Error::ImageFormat("Reference image data URI has no payload separator".to_string())
    })?;

    let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
        Error::ImageFormat("Reference image data URI is not base64-encoded".to_string())
    })?;

    if !SUPPORTED_MIME_TYPES.contains(&mime_type) {
        return Err(Error::ImageFormat(format!(
            "Unsupported reference image MIME type: {}",
            mime_type
        )));
    }

    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| Error::ImageFormat(format!("Reference image payload is not base64: {}", e)))?;

    Ok(ReferenceImage {
        mime_type: mime_type.to_string(),
        data: data.to_string(),
    })
}

/// Sniff an image MIME type from magic bytes. Used by the CLI when encoding
/// a product photo from disk.
pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        _ => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/png",
                &bytes[..bytes.len().min(4)]
            );
            "image/png"
        }
    }
}

/// Encode raw image bytes as a base64 data URI, sniffing the MIME type.
pub fn to_data_uri(bytes: &[u8]) -> String {
    let mime = detect_image_mime(bytes);
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, encoded)
}
