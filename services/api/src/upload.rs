//! Logo upload encoding
//!
//! Uploaded logos are not stored anywhere. The bytes are returned inline as a
//! `data:` URL which the caller saves as a coupon's `logo_url`.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use thiserror::Error;

/// Upload failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    /// Declared content type is missing or not an image
    #[error("File must be an image")]
    InvalidFileType,
}

/// Accept only declared `image/*` content types
pub fn image_content_type(content_type: Option<&str>) -> Result<&str, UploadError> {
    content_type
        .filter(|content_type| content_type.starts_with("image/"))
        .ok_or(UploadError::InvalidFileType)
}

/// Build `data:<content-type>;base64,<data>`
pub fn data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, BASE64.encode(bytes))
}
