// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Key under which the remote log stored a message. Always generated by the store.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageKey(String);

impl MessageKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T> From<T> for MessageKey
where
    T: Into<String>,
{
    fn from(value: T) -> Self {
        MessageKey(value.into())
    }
}

impl Debug for MessageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MessageKey({})", self.0)
    }
}

impl Display for MessageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
