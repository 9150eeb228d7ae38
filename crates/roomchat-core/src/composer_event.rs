// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::messaging::models::MessageKey;
use crate::domain::shared::models::RoomId;
use crate::domain::uploads::models::UploadJobId;

#[cfg_attr(any(test, feature = "test"), mockall::automock)]
pub trait ComposerDelegate: Send + Sync {
    fn handle_event(&self, event: ComposerEvent);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    /// The composer was reset because the active room changed.
    RoomChanged { room_id: Option<RoomId> },

    /// The current upload made progress.
    UploadProgressed { job_id: UploadJobId, percent: u8 },

    /// The current upload failed. The user needs to select the file again to retry.
    UploadFailed { job_id: UploadJobId, reason: String },

    /// A message was appended to the log of `room_id`.
    MessageSent { room_id: RoomId, key: MessageKey },

    /// The remote log rejected a message. A text draft is kept so that it can be sent again.
    SendFailed { room_id: RoomId, reason: String },
}
