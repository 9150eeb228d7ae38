// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use futures::{stream, StreamExt};
use mime::Mime;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};
use url::Url;

use crate::domain::uploads::models::{DestinationPath, SourceFile};
use crate::domain::uploads::services::{BlobMetadata, BlobStore, BlobUpload, BlobUploadEvent};

const DEFAULT_CHUNK_SIZE: u64 = 64 * 1024;

#[derive(Debug, Clone)]
struct StoredBlob {
    data: Arc<[u8]>,
    content_type: Mime,
}

/// Bytes of an upload that has not been committed yet. Counts against the quota until the blob is
/// stored or the upload is dropped.
struct Reservation {
    reserved_bytes: Arc<Mutex<u64>>,
    bytes: u64,
}

impl Drop for Reservation {
    fn drop(&mut self) {
        *self.reserved_bytes.lock() -= self.bytes;
    }
}

/// A process-local `BlobStore` that reports progress in fixed-size chunks. Blobs become visible
/// once their upload completed.
pub struct InMemoryBlobStore {
    base_url: Url,
    chunk_size: u64,
    quota: Option<u64>,
    blobs: Arc<RwLock<HashMap<DestinationPath, StoredBlob>>>,
    reserved_bytes: Arc<Mutex<u64>>,
}

impl InMemoryBlobStore {
    /// `base_url` should end with a slash, blob paths are resolved relative to it.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            chunk_size: DEFAULT_CHUNK_SIZE,
            quota: None,
            blobs: Default::default(),
            reserved_bytes: Default::default(),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Limits the total number of stored bytes. Uploads exceeding it fail with `quota_exceeded`.
    pub fn with_quota(mut self, quota: u64) -> Self {
        self.quota = Some(quota);
        self
    }

    pub fn contains(&self, path: &DestinationPath) -> bool {
        self.blobs.read().contains_key(path)
    }

    pub fn content_type(&self, path: &DestinationPath) -> Option<Mime> {
        self.blobs
            .read()
            .get(path)
            .map(|blob| blob.content_type.clone())
    }

    pub fn used_bytes(&self) -> u64 {
        self.blobs
            .read()
            .values()
            .map(|blob| blob.data.len() as u64)
            .sum()
    }

    fn reserve(&self, path: &DestinationPath, bytes: u64) -> Option<Reservation> {
        let mut reserved_bytes = self.reserved_bytes.lock();

        if let Some(quota) = self.quota {
            let used_bytes = self.used_bytes();
            if used_bytes + *reserved_bytes + bytes > quota {
                warn!(
                    path = %path,
                    used_bytes,
                    reserved_bytes = *reserved_bytes,
                    bytes,
                    quota,
                    "Rejecting blob over quota."
                );
                return None;
            }
        }

        *reserved_bytes += bytes;
        Some(Reservation {
            reserved_bytes: self.reserved_bytes.clone(),
            bytes,
        })
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(
        &self,
        path: &DestinationPath,
        file: &SourceFile,
        metadata: BlobMetadata,
    ) -> Result<BlobUpload> {
        let total_bytes = file.size();

        let Some(reservation) = self.reserve(path, total_bytes) else {
            return Ok(stream::iter(vec![BlobUploadEvent::Failed {
                reason: "quota_exceeded".to_string(),
            }])
            .boxed());
        };

        let mut events = vec![];
        let mut bytes_transferred = 0;
        while bytes_transferred < total_bytes {
            bytes_transferred = (bytes_transferred + self.chunk_size).min(total_bytes);
            events.push(BlobUploadEvent::Progress {
                bytes_transferred,
                total_bytes,
            });
        }

        let blobs = self.blobs.clone();
        let path = path.clone();
        let blob = StoredBlob {
            data: file.data().clone(),
            content_type: metadata.content_type,
        };

        let commit = stream::once(async move {
            debug!(path = %path, "Committing blob.");
            blobs.write().insert(path, blob);
            drop(reservation);
            BlobUploadEvent::Completed
        });

        Ok(stream::iter(events).chain(commit).boxed())
    }

    async fn download_url(&self, path: &DestinationPath) -> Result<Url> {
        if !self.contains(path) {
            bail!("object_not_found: {}", path)
        }
        self.base_url
            .join(path.as_str())
            .with_context(|| format!("Failed to build download URL for {}", path))
    }
}
