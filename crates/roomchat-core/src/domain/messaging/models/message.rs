// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::shared::models::{UserId, UserProfile};

use super::{MessageBody, ServerTimestamp};

/// Snapshot of the sender taken when the message was built. Later profile changes do not alter
/// messages that were already sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAuthor {
    pub id: UserId,
    pub display_name: String,
    pub avatar_url: Option<Url>,
}

impl From<&UserProfile> for MessageAuthor {
    fn from(value: &UserProfile) -> Self {
        MessageAuthor {
            id: value.id.clone(),
            display_name: value.display_name.clone(),
            avatar_url: value.avatar_url.clone(),
        }
    }
}

/// An immutable chat message. Use `MessageFactory` to create one.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    timestamp: ServerTimestamp,
    author: MessageAuthor,
    body: MessageBody,
}

impl Message {
    pub(crate) fn new(timestamp: ServerTimestamp, author: MessageAuthor, body: MessageBody) -> Self {
        Self {
            timestamp,
            author,
            body,
        }
    }

    pub fn timestamp(&self) -> &ServerTimestamp {
        &self.timestamp
    }

    pub fn author(&self) -> &MessageAuthor {
        &self.author
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    pub fn text_content(&self) -> Option<&str> {
        self.body.text_content()
    }

    pub fn image_url(&self) -> Option<&Url> {
        self.body.image_url()
    }
}
