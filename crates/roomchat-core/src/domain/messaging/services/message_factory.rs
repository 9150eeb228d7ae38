// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::messaging::models::{Message, MessageAuthor, MessageBody, ServerTimestamp};
use crate::domain::shared::models::UserProfile;

pub struct MessageFactory;

impl MessageFactory {
    /// Builds a message authored by `author`. The timestamp must come from
    /// `RemoteLogStore::server_timestamp`, the local clock is never consulted.
    pub fn build(author: &UserProfile, timestamp: ServerTimestamp, body: MessageBody) -> Message {
        Message::new(timestamp, MessageAuthor::from(author), body)
    }
}
