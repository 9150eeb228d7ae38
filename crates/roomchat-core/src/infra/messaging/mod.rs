// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use in_memory_room_log::{InMemoryRoomLog, LogEntry, LogEntryAppended};

mod in_memory_room_log;
