// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub trait IDProvider: Send + Sync {
    fn new_id(&self) -> String;
}
