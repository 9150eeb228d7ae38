// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use message::{Message, MessageAuthor};
pub use message_body::{ImageBody, MessageBody, TextBody};
pub use message_key::MessageKey;
pub use send_failure::SendFailure;
pub use server_timestamp::ServerTimestamp;

mod message;
mod message_body;
mod message_key;
mod send_failure;
mod server_timestamp;
