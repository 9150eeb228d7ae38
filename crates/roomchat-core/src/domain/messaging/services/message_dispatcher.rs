// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::{error, info};

use crate::app::deps::DynRemoteLogStore;
use crate::domain::messaging::models::{Message, MessageKey, SendFailure};
use crate::domain::shared::models::RoomId;

/// Appends messages to the remote log. Each call performs exactly one append.
pub struct MessageDispatcher {
    log_store: DynRemoteLogStore,
}

impl MessageDispatcher {
    pub fn new(log_store: DynRemoteLogStore) -> Self {
        Self { log_store }
    }

    /// Appends `message` to the log of `room_id`. `after_send` runs once the store accepted the
    /// message and never runs on failure.
    pub async fn send<F>(
        &self,
        room_id: &RoomId,
        message: Message,
        after_send: F,
    ) -> Result<MessageKey, SendFailure>
    where
        F: FnOnce(&MessageKey) + Send,
    {
        match self.log_store.append(room_id, message).await {
            Ok(key) => {
                info!(room_id = %room_id, key = %key, "Message appended to room log");
                after_send(&key);
                Ok(key)
            }
            Err(err) => {
                error!(room_id = %room_id, "Failed to append message: {:#}", err);
                Err(SendFailure::new(format!("{:#}", err)))
            }
        }
    }
}
