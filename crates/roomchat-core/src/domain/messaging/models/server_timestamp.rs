// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

/// Placeholder for the moment the remote log accepts a message.
///
/// Only a `RemoteLogStore` hands these out and only the store resolves them into an actual
/// point in time when the message is written. No ordering is defined on this type. Messages are
/// ordered by the log itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTimestamp {
    _private: (),
}

impl ServerTimestamp {
    /// Creates an unresolved marker. Meant to be called by `RemoteLogStore` implementations.
    pub fn pending() -> Self {
        ServerTimestamp { _private: () }
    }
}
