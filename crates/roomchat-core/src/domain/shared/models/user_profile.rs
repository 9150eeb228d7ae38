// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use url::Url;

use super::UserId;

/// The signed-in user as supplied by the authentication layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub avatar_url: Option<Url>,
}

impl UserProfile {
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            avatar_url: None,
        }
    }

    pub fn set_avatar_url(mut self, avatar_url: Url) -> Self {
        self.avatar_url = Some(avatar_url);
        self
    }
}
