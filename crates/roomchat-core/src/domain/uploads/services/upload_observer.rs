// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use url::Url;

use crate::domain::uploads::models::{UploadFailure, UploadJobId};

/// Receives the callbacks of an upload job. Never called for superseded or cancelled jobs.
#[async_trait]
#[cfg_attr(any(test, feature = "test"), mockall::automock)]
pub trait UploadObserver: Send + Sync {
    async fn upload_progressed(&self, job_id: UploadJobId, percent: u8);
    async fn upload_succeeded(&self, job_id: UploadJobId, url: Url);
    async fn upload_failed(&self, job_id: UploadJobId, failure: UploadFailure);
}
