// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use auth_provider::AuthProvider;
pub use room_context::RoomContext;
pub use scroll_sink::ScrollSink;

mod auth_provider;
mod room_context;
mod scroll_sink;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::auth_provider::MockAuthProvider;
    pub use super::room_context::MockRoomContext;
    pub use super::scroll_sink::MockScrollSink;
}
