// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use mime::Mime;

/// Why an upload job ended in `UploadStatus::Failed`.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Upload failed: {reason}")]
pub struct UploadFailure {
    pub reason: String,
}

impl UploadFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn file_too_large(size: u64, max_size: u64) -> Self {
        Self::new(format!("file_too_large ({} bytes, max {})", size, max_size))
    }

    pub fn unsupported_media_type(media_type: &Mime) -> Self {
        Self::new(format!("unsupported_media_type ({})", media_type.essence_str()))
    }

    pub fn interrupted() -> Self {
        Self::new("upload_interrupted")
    }
}
