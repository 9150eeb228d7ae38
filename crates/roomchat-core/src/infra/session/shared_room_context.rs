// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::session::services::RoomContext;
use crate::domain::shared::models::RoomId;

/// The active room as set by the room list. Clones share the same value.
#[derive(Clone, Default)]
pub struct SharedRoomContext {
    current_room: Arc<RwLock<Option<RoomId>>>,
}

impl SharedRoomContext {
    pub fn new(room_id: Option<RoomId>) -> Self {
        Self {
            current_room: Arc::new(RwLock::new(room_id)),
        }
    }

    pub fn set_current_room(&self, room_id: Option<RoomId>) {
        *self.current_room.write() = room_id;
    }
}

impl RoomContext for SharedRoomContext {
    fn current_room(&self) -> Option<RoomId> {
        self.current_room.read().clone()
    }
}
