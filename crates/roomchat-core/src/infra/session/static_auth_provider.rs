// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::session::services::AuthProvider;
use crate::domain::shared::models::UserProfile;

#[derive(Clone, Default)]
pub struct StaticAuthProvider {
    user: Arc<RwLock<Option<UserProfile>>>,
}

impl StaticAuthProvider {
    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            user: Arc::new(RwLock::new(Some(user))),
        }
    }

    pub fn sign_in(&self, user: UserProfile) {
        *self.user.write() = Some(user);
    }

    pub fn sign_out(&self) {
        self.user.write().take();
    }
}

impl AuthProvider for StaticAuthProvider {
    fn current_user(&self) -> Option<UserProfile> {
        self.user.read().clone()
    }
}
