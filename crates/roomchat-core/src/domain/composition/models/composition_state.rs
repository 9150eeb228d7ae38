// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::uploads::models::{UploadJob, UploadJobId, UploadStatus};

/// Where the composer currently is, as shown to the user. When a text message and an upload are in
/// flight at the same time the upload wins.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerPhase {
    /// Nothing typed, nothing in flight.
    Idle,
    /// The draft contains text.
    Composing,
    /// A file is being uploaded.
    Uploading(UploadJob),
    /// A message was handed to the remote log and we're waiting for it to be accepted.
    Sending(Outgoing),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    Text(String),
    /// The job that produced the image. Its status is always `Succeeded`.
    Image(UploadJob),
}

/// The upload side of the composer. Runs independently of text messages.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadTask {
    Transferring(UploadJob),
    /// The upload finished and its image message is being appended.
    SendingImage(UploadJob),
}

/// Transient UI state of the composer of a single room.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositionState {
    pub draft_text: String,
    pub upload_modal_open: bool,
    pub upload: Option<UploadTask>,
    /// Text of the message waiting for the remote log.
    pub pending_text: Option<String>,
    /// The most recent upload job that reached a terminal state.
    pub last_upload: Option<UploadJob>,
}

impl CompositionState {
    pub fn phase(&self) -> ComposerPhase {
        match (&self.upload, &self.pending_text) {
            (Some(UploadTask::Transferring(job)), _) => ComposerPhase::Uploading(job.clone()),
            (Some(UploadTask::SendingImage(job)), _) => {
                ComposerPhase::Sending(Outgoing::Image(job.clone()))
            }
            (None, Some(text)) => ComposerPhase::Sending(Outgoing::Text(text.clone())),
            (None, None) if self.draft_text.is_empty() => ComposerPhase::Idle,
            (None, None) => ComposerPhase::Composing,
        }
    }

    /// Value of the progress bar.
    pub fn upload_progress(&self) -> u8 {
        match &self.upload {
            Some(UploadTask::Transferring(job)) => job.percent(),
            Some(UploadTask::SendingImage(_)) => 100,
            None => 0,
        }
    }

    /// The job with `job_id` if it is still transferring.
    pub(crate) fn transfer_mut(&mut self, job_id: UploadJobId) -> Option<&mut UploadJob> {
        match &mut self.upload {
            Some(UploadTask::Transferring(job)) if job.id == job_id => Some(job),
            _ => None,
        }
    }

    pub(crate) fn is_sending_image(&self, job_id: UploadJobId) -> bool {
        matches!(&self.upload, Some(UploadTask::SendingImage(job)) if job.id == job_id)
    }

    /// Moves a finished job out of the upload track into `last_upload`.
    pub fn finish_upload(&mut self, job: UploadJob) {
        debug_assert!(matches!(
            job.status,
            UploadStatus::Succeeded { .. } | UploadStatus::Failed { .. }
        ));
        self.upload = None;
        self.last_upload = Some(job);
    }
}
