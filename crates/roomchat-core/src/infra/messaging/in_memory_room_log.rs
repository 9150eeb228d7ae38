// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use crate::app::deps::{DynIDProvider, DynTimeProvider};
use crate::domain::messaging::models::{
    Message, MessageAuthor, MessageBody, MessageKey, ServerTimestamp,
};
use crate::domain::messaging::services::RemoteLogStore;
use crate::domain::shared::models::RoomId;

const EVENT_CAPACITY: usize = 64;

/// A message as it was written to the log, with the timestamp assigned by the log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub key: MessageKey,
    pub timestamp: DateTime<Utc>,
    pub author: MessageAuthor,
    pub body: MessageBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntryAppended {
    pub room_id: RoomId,
    pub entry: LogEntry,
}

/// A process-local `RemoteLogStore`. Timestamps within a room are strictly increasing even if the
/// clock is not.
pub struct InMemoryRoomLog {
    rooms: RwLock<HashMap<RoomId, Vec<LogEntry>>>,
    id_provider: DynIDProvider,
    time_provider: DynTimeProvider,
    events: broadcast::Sender<LogEntryAppended>,
}

impl InMemoryRoomLog {
    pub fn new(id_provider: DynIDProvider, time_provider: DynTimeProvider) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            rooms: Default::default(),
            id_provider,
            time_provider,
            events,
        }
    }

    /// Makes `room_id` accept messages. Existing rooms keep their entries.
    pub fn create_room(&self, room_id: impl Into<RoomId>) {
        self.rooms.write().entry(room_id.into()).or_default();
    }

    pub fn messages(&self, room_id: &RoomId) -> Vec<LogEntry> {
        self.rooms
            .read()
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Notifies about every entry appended from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntryAppended> {
        self.events.subscribe()
    }
}

#[async_trait]
impl RemoteLogStore for InMemoryRoomLog {
    fn server_timestamp(&self) -> ServerTimestamp {
        ServerTimestamp::pending()
    }

    async fn append(&self, room_id: &RoomId, message: Message) -> Result<MessageKey> {
        let entry = {
            let mut rooms = self.rooms.write();
            let Some(entries) = rooms.get_mut(room_id) else {
                bail!("room_not_found: {}", room_id)
            };

            let mut timestamp = self.time_provider.now();
            if let Some(last) = entries.last() {
                if timestamp <= last.timestamp {
                    timestamp = last.timestamp + Duration::milliseconds(1);
                }
            }

            let entry = LogEntry {
                key: MessageKey::from(self.id_provider.new_id()),
                timestamp,
                author: message.author().clone(),
                body: message.body().clone(),
            };
            entries.push(entry.clone());
            entry
        };

        debug!(room_id = %room_id, key = %entry.key, "Appended entry to room log.");

        // Nobody listening is fine.
        _ = self.events.send(LogEntryAppended {
            room_id: room_id.clone(),
            entry: entry.clone(),
        });

        Ok(entry.key)
    }
}
