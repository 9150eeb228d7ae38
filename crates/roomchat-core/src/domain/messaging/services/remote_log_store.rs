// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::messaging::models::{Message, MessageKey, ServerTimestamp};
use crate::domain::shared::models::RoomId;

/// The shared, append-only per-room message log.
#[async_trait]
#[cfg_attr(any(test, feature = "test"), mockall::automock)]
pub trait RemoteLogStore: Send + Sync {
    /// Returns the marker the store replaces with its own clock when a message is appended.
    fn server_timestamp(&self) -> ServerTimestamp;

    /// Appends `message` to the log of `room_id` under a store-generated key.
    async fn append(&self, room_id: &RoomId, message: Message) -> Result<MessageKey>;
}
