//! MIME type detection for uploaded images.
//!
//! Content-based detection (magic bytes) is tried first since client-supplied
//! file names are untrustworthy; extension-based detection via mime_guess is
//! the fallback for formats `infer` does not know.

use std::path::Path;
use tracing::debug;

/// Image types the upload endpoint accepts.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// Detects the MIME type of an uploaded file from its bytes, falling back to
/// the file extension.
pub fn detect_mime_type(data: &[u8], filename: &str) -> String {
    if let Some(kind) = infer::get(data) {
        debug!("Detected MIME type {} from magic bytes", kind.mime_type());
        return kind.mime_type().to_string();
    }

    if let Some(ext) = Path::new(filename).extension().and_then(|e| e.to_str()) {
        let guessed = mime_guess::from_ext(ext).first_or_octet_stream();
        debug!("Falling back to extension-based MIME type {}", guessed);
        return guessed.essence_str().to_string();
    }

    "application/octet-stream".to_string()
}

pub fn is_allowed_image_type(mime_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&mime_type)
}
