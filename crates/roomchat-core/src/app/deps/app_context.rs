// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use mime::Mime;
use serde::Deserialize;

use crate::domain::uploads::models::{SourceFile, UploadFailure, UploadJobId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory in the blob store that receives uploaded images.
    pub upload_path_prefix: String,
    /// Used when no extension can be derived from a file's media type.
    pub fallback_image_extension: String,
    /// The maximum size of an uploaded file in bytes.
    pub max_upload_size: u64,
    /// Media types (without parameters) a file must have to be uploaded.
    pub accepted_media_types: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_path_prefix: "images".to_string(),
            fallback_image_extension: "jpg".to_string(),
            max_upload_size: 10 * 1024 * 1024,
            accepted_media_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
                "image/webp".to_string(),
            ],
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse composer configuration")
    }

    pub fn accepts_media_type(&self, media_type: &Mime) -> bool {
        self.accepted_media_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(media_type.essence_str()))
    }

    /// Checks that `file` may be uploaded at all before the blob store is involved.
    pub fn validate_upload(&self, file: &SourceFile) -> Result<(), UploadFailure> {
        if file.size() > self.max_upload_size {
            return Err(UploadFailure::file_too_large(
                file.size(),
                self.max_upload_size,
            ));
        }
        if !self.accepts_media_type(file.media_type()) {
            return Err(UploadFailure::unsupported_media_type(file.media_type()));
        }
        Ok(())
    }
}

pub struct AppContext {
    pub config: AppConfig,
    last_upload_job_id: AtomicU64,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            last_upload_job_id: AtomicU64::new(0),
        }
    }

    pub fn next_upload_job_id(&self) -> UploadJobId {
        UploadJobId::new(self.last_upload_job_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
