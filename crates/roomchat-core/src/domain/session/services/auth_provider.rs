// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::UserProfile;

#[cfg_attr(any(test, feature = "test"), mockall::automock)]
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<UserProfile>;
}
