// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

use crate::app::services::ComposerInner;
use crate::domain::composition::models::{Outgoing, UploadTask};
use crate::domain::messaging::models::MessageBody;
use crate::domain::uploads::models::{UploadFailure, UploadJobId};
use crate::domain::uploads::services::UploadObserver;
use crate::ComposerEvent;

/// Folds the callbacks of the current upload job into the composition state. Every callback
/// re-reads the active room first, so callbacks of jobs that belonged to a previous room or were
/// superseded are dropped.
#[async_trait]
impl UploadObserver for ComposerInner {
    async fn upload_progressed(&self, job_id: UploadJobId, percent: u8) {
        self.sync_room();

        {
            let mut session = self.session.lock();
            let Some(job) = session.state.transfer_mut(job_id) else {
                debug!(job_id = %job_id, "Ignoring progress of stale upload.");
                return;
            };
            if !job.set_progress(percent) {
                return;
            }
        }

        self.dispatch_event(ComposerEvent::UploadProgressed { job_id, percent });
    }

    async fn upload_succeeded(&self, job_id: UploadJobId, url: Url) {
        self.sync_room();

        let (room_id, epoch, message, outgoing) = {
            let mut session = self.session.lock();

            let Some(mut job) = session.state.transfer_mut(job_id).cloned() else {
                debug!(job_id = %job_id, "Ignoring completion of stale upload.");
                return;
            };
            let Some(room_id) = session.room_id.clone() else {
                return;
            };

            job.succeed(url.clone());
            session.upload_handle = None;

            match self.build_message(MessageBody::image(url)) {
                Ok(message) => {
                    session.state.upload = Some(UploadTask::SendingImage(job.clone()));
                    (room_id, session.epoch, message, Outgoing::Image(job))
                }
                Err(err) => {
                    session.state.finish_upload(job);
                    drop(session);
                    self.dispatch_event(ComposerEvent::SendFailed {
                        room_id,
                        reason: err.to_string(),
                    });
                    return;
                }
            }
        };

        info!(room_id = %room_id, job_id = %job_id, "Sending image message…");

        let result = self
            .dispatcher
            .send(&room_id, message, |key| {
                self.finish_send(epoch, &room_id, &outgoing, key)
            })
            .await;

        if let Err(failure) = result {
            self.fail_send(epoch, &room_id, &outgoing, &failure);
        }
    }

    async fn upload_failed(&self, job_id: UploadJobId, failure: UploadFailure) {
        self.sync_room();

        {
            let mut session = self.session.lock();
            let Some(mut job) = session.state.transfer_mut(job_id).cloned() else {
                debug!(job_id = %job_id, "Ignoring failure of stale upload.");
                return;
            };

            warn!(job_id = %job_id, "{}", failure);

            job.fail(failure.reason.clone());
            session.state.finish_upload(job);
            session.upload_handle = None;
        }

        self.dispatch_event(ComposerEvent::UploadFailed {
            job_id,
            reason: failure.reason,
        });
    }
}
