// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::app::deps::AppDependencies;
use crate::domain::composition::models::{
    ComposerError, ComposerPhase, CompositionState, Outgoing, UploadTask,
};
use crate::domain::messaging::models::{Message, MessageBody, MessageKey, SendFailure};
use crate::domain::messaging::services::{MessageDispatcher, MessageFactory};
use crate::domain::shared::models::{RoomId, ValidationError};
use crate::domain::uploads::models::{DestinationPath, SourceFile, UploadJob};
use crate::domain::uploads::services::{CancelHandle, UploadController};
use crate::ComposerEvent;

/// The message composer of the active room.
///
/// Holds the draft, the upload modal flag and the current upload, and turns discrete user
/// actions (pressing Enter, confirming a file) into messages in the room's log.
#[derive(Clone)]
pub struct ComposerService {
    inner: Arc<ComposerInner>,
}

pub(crate) struct ComposerInner {
    pub(crate) deps: AppDependencies,
    pub(crate) dispatcher: MessageDispatcher,
    pub(crate) uploader: UploadController,
    pub(crate) session: Mutex<Session>,
}

/// Composition state bound to one room. `epoch` changes whenever the room changes so that late
/// completions can tell whether they still belong to the visible composer.
pub(crate) struct Session {
    pub(crate) room_id: Option<RoomId>,
    pub(crate) epoch: u64,
    pub(crate) state: CompositionState,
    pub(crate) upload_handle: Option<CancelHandle>,
}

impl From<AppDependencies> for ComposerService {
    fn from(deps: AppDependencies) -> Self {
        let dispatcher = MessageDispatcher::new(deps.log_store.clone());
        let uploader = UploadController::new(deps.blob_store.clone());

        ComposerService {
            inner: Arc::new(ComposerInner {
                deps,
                dispatcher,
                uploader,
                session: Mutex::new(Session::new(None)),
            }),
        }
    }
}

impl ComposerService {
    pub fn state(&self) -> CompositionState {
        self.inner.session.lock().state.clone()
    }

    pub fn draft_text(&self) -> String {
        self.inner.session.lock().state.draft_text.clone()
    }

    pub fn upload_progress(&self) -> u8 {
        self.inner.session.lock().state.upload_progress()
    }

    pub fn phase(&self) -> ComposerPhase {
        self.inner.session.lock().state.phase()
    }

    /// The room the composer is currently bound to.
    pub fn room_id(&self) -> Option<RoomId> {
        self.inner.session.lock().room_id.clone()
    }

    /// Re-reads the active room and resets the composer if it changed.
    pub fn sync_room(&self) -> Option<RoomId> {
        self.inner.sync_room()
    }

    pub fn set_draft_text(&self, text: impl Into<String>) {
        if self.inner.sync_room().is_none() {
            debug!("Ignoring input since no room is selected.");
            return;
        }
        self.inner.session.lock().state.draft_text = text.into();
    }

    pub fn open_upload_modal(&self) {
        if self.inner.sync_room().is_none() {
            debug!("Not opening upload modal since no room is selected.");
            return;
        }
        self.inner.session.lock().state.upload_modal_open = true;
    }

    pub fn close_upload_modal(&self) {
        self.inner.session.lock().state.upload_modal_open = false;
    }

    /// Sends the draft (the user pressed Enter).
    ///
    /// Works while an upload is running. Returns `Ok(None)` without touching the remote log if there
    /// is no room, the draft is empty or a text message is still waiting for the remote log. On
    /// failure the draft is kept.
    pub async fn send_draft(&self) -> Result<Option<MessageKey>, ComposerError> {
        let Some(room_id) = self.inner.sync_room() else {
            debug!("Not sending draft since no room is selected.");
            return Ok(None);
        };

        let (message, outgoing, epoch) = {
            let mut session = self.inner.session.lock();

            if session.state.draft_text.is_empty() {
                return Ok(None);
            }
            if session.state.pending_text.is_some() {
                debug!("Not sending draft while the previous message is in flight.");
                return Ok(None);
            }

            let text = session.state.draft_text.clone();
            let message = self.inner.build_message(MessageBody::text(text.clone())?)?;
            session.state.pending_text = Some(text.clone());

            (message, Outgoing::Text(text), session.epoch)
        };

        info!(room_id = %room_id, "Sending text message…");

        let result = self
            .inner
            .dispatcher
            .send(&room_id, message, |key| {
                self.inner.finish_send(epoch, &room_id, &outgoing, key)
            })
            .await;

        match result {
            Ok(key) => Ok(Some(key)),
            Err(failure) => {
                self.inner.fail_send(epoch, &room_id, &outgoing, &failure);
                Err(ComposerError::Send(failure))
            }
        }
    }

    /// Uploads `file` and sends it as an image message once the upload succeeded (the user
    /// confirmed the file in the upload modal).
    ///
    /// Works while a text message is being sent. Returns `Ok(None)` if there is no room or the
    /// modal is closed. An upload that is still running is superseded.
    pub fn start_upload(&self, file: SourceFile) -> Result<Option<CancelHandle>, ComposerError> {
        let Some(room_id) = self.inner.sync_room() else {
            debug!("Not uploading since no room is selected.");
            return Ok(None);
        };

        let ctx = &self.inner.deps.ctx;
        let mut session = self.inner.session.lock();

        if !session.state.upload_modal_open {
            debug!("Not uploading since the upload modal is closed.");
            return Ok(None);
        }

        let destination_path = DestinationPath::generate(
            &ctx.config.upload_path_prefix,
            self.inner.deps.id_provider.as_ref(),
            file.media_type(),
            &ctx.config.fallback_image_extension,
        );
        let mut job = UploadJob::new(ctx.next_upload_job_id(), file, destination_path);

        session.state.upload_modal_open = false;

        if let Some(previous) = session.upload_handle.take() {
            info!(job_id = %job.id, "Superseding {}", previous.job_id());
            previous.cancel();
        }

        if let Err(failure) = ctx.config.validate_upload(&job.source_file) {
            warn!(job_id = %job.id, "Rejecting {:?}: {}", job.source_file, failure);
            job.fail(failure.reason.clone());
            let job_id = job.id;
            session.state.finish_upload(job);
            drop(session);

            self.inner.dispatch_event(ComposerEvent::UploadFailed {
                job_id,
                reason: failure.reason.clone(),
            });
            return Err(ComposerError::Upload(failure));
        }

        job.set_progress(0);

        info!(room_id = %room_id, job_id = %job.id, path = %job.destination_path, "Uploading image…");

        let handle = self.inner.uploader.start_upload(&job, self.inner.clone());
        session.state.upload = Some(UploadTask::Transferring(job));
        session.upload_handle = Some(handle.clone());

        Ok(Some(handle))
    }

    /// Tears the composer down. Cancels the running upload and discards the effects of sends
    /// that are still in flight.
    pub fn dispose(&self) {
        self.inner.session.lock().reset(None);
    }
}

impl ComposerInner {
    pub(crate) fn sync_room(&self) -> Option<RoomId> {
        let room_id = self.deps.room_context.current_room();

        {
            let mut session = self.session.lock();
            if session.room_id == room_id {
                return room_id;
            }
            info!("Switching composer to room {:?}", room_id);
            session.reset(room_id.clone());
        }

        self.dispatch_event(ComposerEvent::RoomChanged {
            room_id: room_id.clone(),
        });
        room_id
    }

    pub(crate) fn build_message(&self, body: MessageBody) -> Result<Message, ValidationError> {
        let Some(author) = self.deps.auth_provider.current_user() else {
            error!("Cannot build a message without a signed-in user.");
            return Err(ValidationError::MissingAuthor);
        };
        Ok(MessageFactory::build(
            &author,
            self.deps.log_store.server_timestamp(),
            body,
        ))
    }

    /// Post-send effects. Skipped if the room changed while the message was in flight.
    pub(crate) fn finish_send(
        &self,
        epoch: u64,
        room_id: &RoomId,
        outgoing: &Outgoing,
        key: &MessageKey,
    ) {
        self.sync_room();

        {
            let mut session = self.session.lock();
            if session.epoch != epoch {
                debug!(room_id = %room_id, "Room changed while sending. Skipping post-send effects.");
                return;
            }

            match outgoing {
                Outgoing::Text(text) => {
                    session.state.pending_text = None;
                    // Text typed while the message was in flight survives.
                    if session.state.draft_text == *text {
                        session.state.draft_text.clear();
                    }
                }
                Outgoing::Image(job) => {
                    if session.state.is_sending_image(job.id) {
                        session.state.finish_upload(job.clone());
                    }
                }
            }
        }

        self.deps.scroll_sink.scroll_to_latest(room_id);
        self.dispatch_event(ComposerEvent::MessageSent {
            room_id: room_id.clone(),
            key: key.clone(),
        });
    }

    /// Leaves the sending state after the remote log rejected a message. The draft is untouched.
    pub(crate) fn fail_send(
        &self,
        epoch: u64,
        room_id: &RoomId,
        outgoing: &Outgoing,
        failure: &SendFailure,
    ) {
        self.sync_room();

        {
            let mut session = self.session.lock();
            if session.epoch != epoch {
                debug!(room_id = %room_id, "Room changed while sending. Dropping send failure.");
                return;
            }

            match outgoing {
                Outgoing::Text(_) => session.state.pending_text = None,
                Outgoing::Image(job) => {
                    if session.state.is_sending_image(job.id) {
                        session.state.finish_upload(job.clone());
                    }
                }
            }
        }

        self.dispatch_event(ComposerEvent::SendFailed {
            room_id: room_id.clone(),
            reason: failure.reason.clone(),
        });
    }

    pub(crate) fn dispatch_event(&self, event: ComposerEvent) {
        let Some(ref delegate) = self.deps.delegate else {
            return;
        };
        delegate.handle_event(event)
    }
}

impl Session {
    fn new(room_id: Option<RoomId>) -> Self {
        Self {
            room_id,
            epoch: 0,
            state: Default::default(),
            upload_handle: None,
        }
    }

    /// Binds the session to `room_id`, discarding everything that belonged to the previous room.
    pub(crate) fn reset(&mut self, room_id: Option<RoomId>) {
        if let Some(handle) = self.upload_handle.take() {
            debug!(job_id = %handle.job_id(), "Cancelling upload of previous room.");
            handle.cancel();
        }
        self.room_id = room_id;
        self.epoch += 1;
        self.state = Default::default();
    }
}
