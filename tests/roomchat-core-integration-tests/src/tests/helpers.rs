// roomchat-core/roomchat-core-integration-tests
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::Mutex;

use roomchat_core::domain::session::services::ScrollSink;
use roomchat_core::dtos::{RoomId, ServerTimestamp};
use roomchat_core::test::{mock_data, MockAppDependencies};
use roomchat_core::{ComposerDelegate, ComposerEvent};

#[derive(Default)]
pub struct EventRecorder {
    events: Mutex<Vec<ComposerEvent>>,
}

impl EventRecorder {
    pub fn events(&self) -> Vec<ComposerEvent> {
        self.events.lock().clone()
    }
}

impl ComposerDelegate for EventRecorder {
    fn handle_event(&self, event: ComposerEvent) {
        self.events.lock().push(event)
    }
}

/// Usable where the composer takes ownership of its scroll sink.
#[derive(Clone, Default)]
pub struct ScrollRecorder {
    rooms: Arc<Mutex<Vec<RoomId>>>,
}

impl ScrollRecorder {
    pub fn rooms(&self) -> Vec<RoomId> {
        self.rooms.lock().clone()
    }
}

impl ScrollSink for ScrollRecorder {
    fn scroll_to_latest(&self, room_id: &RoomId) {
        self.rooms.lock().push(room_id.clone())
    }
}

/// Dependencies of a composer whose user is signed in and looking at `mock_data::room_id()`.
pub fn deps_in_room() -> MockAppDependencies {
    let mut deps = MockAppDependencies::default();

    deps.room_context
        .expect_current_room()
        .returning(|| Some(mock_data::room_id()));
    deps.auth_provider
        .expect_current_user()
        .returning(|| Some(mock_data::user()));
    deps.log_store
        .expect_server_timestamp()
        .returning(ServerTimestamp::pending);

    deps
}
