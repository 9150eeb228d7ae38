// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

/// The remote log rejected an append.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Failed to send message: {reason}")]
pub struct SendFailure {
    pub reason: String,
}

impl SendFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
