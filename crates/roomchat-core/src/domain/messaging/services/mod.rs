// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use message_dispatcher::MessageDispatcher;
pub use message_factory::MessageFactory;
pub use remote_log_store::RemoteLogStore;

mod message_dispatcher;
mod message_factory;
mod remote_log_store;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::remote_log_store::MockRemoteLogStore;
}
