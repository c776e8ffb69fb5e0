use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::AppError;

pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Validates an uploaded payload and turns it into an embeddable data URL.
/// Rejections happen before any record is constructed.
pub fn ingest_image(content_type: &str, image_b64: &str) -> Result<String, AppError> {
    if !content_type.starts_with("image/") {
        return Err(AppError::validation("file must be an image"));
    }

    let decoded = BASE64
        .decode(image_b64.trim())
        .map_err(|_| AppError::validation("invalid base64 image payload"))?;
    if decoded.is_empty() {
        return Err(AppError::validation("image payload is empty"));
    }
    if decoded.len() > MAX_PHOTO_BYTES {
        return Err(AppError::validation("image must be smaller than 5 MiB"));
    }

    Ok(format!(
        "data:{};base64,{}",
        content_type,
        BASE64.encode(decoded)
    ))
}
