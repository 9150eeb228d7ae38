// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use shared_room_context::SharedRoomContext;
pub use static_auth_provider::StaticAuthProvider;

mod shared_room_context;
mod static_auth_provider;
