// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use mime::Mime;
use url::Url;

use crate::domain::uploads::models::{DestinationPath, SourceFile};

#[derive(Debug, Clone, PartialEq)]
pub struct BlobMetadata {
    pub content_type: Mime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlobUploadEvent {
    Progress {
        bytes_transferred: u64,
        total_bytes: u64,
    },
    Completed,
    Failed {
        reason: String,
    },
}

/// Events of a single blob write. Ends after `Completed` or `Failed`.
pub type BlobUpload = BoxStream<'static, BlobUploadEvent>;

#[async_trait]
#[cfg_attr(any(test, feature = "test"), mockall::automock)]
pub trait BlobStore: Send + Sync {
    /// Starts writing `file` to `path`.
    async fn put(
        &self,
        path: &DestinationPath,
        file: &SourceFile,
        metadata: BlobMetadata,
    ) -> Result<BlobUpload>;

    /// Resolves the durable URL of a blob that was written successfully.
    async fn download_url(&self, path: &DestinationPath) -> Result<Url>;
}
