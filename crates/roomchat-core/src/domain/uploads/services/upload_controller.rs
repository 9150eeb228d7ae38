// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{AbortHandle, Abortable};
use futures::StreamExt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::app::deps::{DynBlobStore, DynUploadObserver};
use crate::domain::uploads::models::{UploadFailure, UploadJob, UploadJobId, UploadProgress};
use crate::domain::uploads::services::{BlobMetadata, BlobUploadEvent};

const NO_JOB: u64 = 0;

/// Drives upload jobs against the blob store. Only the most recently started job is current,
/// callbacks of every other job are dropped.
pub struct UploadController {
    blob_store: DynBlobStore,
    current_job: Arc<AtomicU64>,
}

/// Suppresses the callbacks of a job once it was cancelled. Cloning is cheap.
#[derive(Clone)]
pub struct CancelHandle {
    job_id: UploadJobId,
    guard: CallbackGuard,
    abort_handle: AbortHandle,
    finished: watch::Receiver<bool>,
}

#[derive(Clone)]
struct CallbackGuard {
    job_id: UploadJobId,
    current_job: Arc<AtomicU64>,
    cancelled: Arc<AtomicBool>,
}

struct FinishedSignal(watch::Sender<bool>);

impl UploadController {
    pub fn new(blob_store: DynBlobStore) -> Self {
        Self {
            blob_store,
            current_job: Arc::new(AtomicU64::new(NO_JOB)),
        }
    }

    /// Starts uploading `job` in the background and supersedes any job started before.
    pub fn start_upload(&self, job: &UploadJob, observer: DynUploadObserver) -> CancelHandle {
        let previous = self.current_job.swap(job.id.value(), Ordering::SeqCst);
        if previous != NO_JOB && previous != job.id.value() {
            debug!(job_id = %job.id, "Superseding upload-{}", previous);
        }

        let guard = CallbackGuard {
            job_id: job.id,
            current_job: self.current_job.clone(),
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        let (finished_tx, finished_rx) = watch::channel(false);
        let (abort_handle, abort_registration) = AbortHandle::new_pair();

        let upload = drive_upload(
            self.blob_store.clone(),
            job.clone(),
            guard.clone(),
            observer,
            FinishedSignal(finished_tx),
        );
        tokio::spawn(Abortable::new(upload, abort_registration));

        CancelHandle {
            job_id: job.id,
            guard,
            abort_handle,
            finished: finished_rx,
        }
    }

    #[cfg(test)]
    fn is_current(&self, job_id: UploadJobId) -> bool {
        self.current_job.load(Ordering::SeqCst) == job_id.value()
    }
}

impl CancelHandle {
    pub fn job_id(&self) -> UploadJobId {
        self.job_id
    }

    /// Stops all further callbacks of the job. The blob store may still finish the transfer.
    pub fn cancel(&self) {
        self.guard.cancel();
        self.abort_handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.guard.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the job's background task has ended, for whatever reason.
    pub async fn finished(&self) {
        let mut finished = self.finished.clone();
        _ = finished.wait_for(|is_finished| *is_finished).await;
    }
}

impl CallbackGuard {
    fn is_live(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
            && self.current_job.load(Ordering::SeqCst) == self.job_id.value()
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        _ = self.current_job.compare_exchange(
            self.job_id.value(),
            NO_JOB,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }
}

impl Drop for FinishedSignal {
    fn drop(&mut self) {
        self.0.send_replace(true);
    }
}

async fn drive_upload(
    blob_store: DynBlobStore,
    job: UploadJob,
    guard: CallbackGuard,
    observer: DynUploadObserver,
    _finished: FinishedSignal,
) {
    let job_id = job.id;
    let metadata = BlobMetadata {
        content_type: job.source_file.media_type().clone(),
    };

    info!(
        job_id = %job_id,
        path = %job.destination_path,
        size = job.source_file.size(),
        "Starting upload…"
    );

    let mut events = match blob_store
        .put(&job.destination_path, &job.source_file, metadata)
        .await
    {
        Ok(events) => events,
        Err(err) => {
            warn!(job_id = %job_id, "Blob store rejected upload: {:#}", err);
            if guard.is_live() {
                observer
                    .upload_failed(job_id, UploadFailure::new(format!("{:#}", err)))
                    .await;
            }
            return;
        }
    };

    let mut progress = UploadProgress::default();

    while let Some(event) = events.next().await {
        if !guard.is_live() {
            debug!(job_id = %job_id, "Dropping events of stale upload.");
            return;
        }

        match event {
            BlobUploadEvent::Progress {
                bytes_transferred,
                total_bytes,
            } => {
                let percent = progress.advance(bytes_transferred, total_bytes);
                observer.upload_progressed(job_id, percent).await;
            }
            BlobUploadEvent::Completed => {
                let url = blob_store.download_url(&job.destination_path).await;

                if !guard.is_live() {
                    debug!(job_id = %job_id, "Upload completed after it was superseded.");
                    return;
                }

                match url {
                    Ok(url) => {
                        info!(job_id = %job_id, url = %url, "Upload finished.");
                        observer.upload_succeeded(job_id, url).await
                    }
                    Err(err) => {
                        warn!(job_id = %job_id, "Failed to resolve download URL: {:#}", err);
                        observer
                            .upload_failed(job_id, UploadFailure::new(format!("{:#}", err)))
                            .await
                    }
                }
                return;
            }
            BlobUploadEvent::Failed { reason } => {
                warn!(job_id = %job_id, reason = %reason, "Upload failed.");
                observer
                    .upload_failed(job_id, UploadFailure::new(reason))
                    .await;
                return;
            }
        }
    }

    if guard.is_live() {
        warn!(job_id = %job_id, "Blob store ended upload without a result.");
        observer
            .upload_failed(job_id, UploadFailure::interrupted())
            .await;
    }
}
