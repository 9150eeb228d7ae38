// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use blob_store::{BlobMetadata, BlobStore, BlobUpload, BlobUploadEvent};
pub use upload_controller::{CancelHandle, UploadController};
pub use upload_observer::UploadObserver;

mod blob_store;
mod upload_controller;
mod upload_observer;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::blob_store::MockBlobStore;
    pub use super::upload_observer::MockUploadObserver;
}
