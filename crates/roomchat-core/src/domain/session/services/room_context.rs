// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::RoomId;

#[cfg_attr(any(test, feature = "test"), mockall::automock)]
pub trait RoomContext: Send + Sync {
    /// The room the user is looking at. The composer is disabled while this is `None`.
    fn current_room(&self) -> Option<RoomId>;
}
