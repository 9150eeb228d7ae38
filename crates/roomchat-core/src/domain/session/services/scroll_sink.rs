// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::RoomId;

#[cfg_attr(any(test, feature = "test"), mockall::automock)]
pub trait ScrollSink: Send + Sync {
    /// Scrolls the message list of `room_id` to its newest entry.
    fn scroll_to_latest(&self, room_id: &RoomId);
}
