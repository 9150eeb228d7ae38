// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use room_id::RoomId;
pub use user_id::UserId;
pub use user_profile::UserProfile;
pub use validation_error::ValidationError;

mod room_id;
mod user_id;
mod user_profile;
mod validation_error;
