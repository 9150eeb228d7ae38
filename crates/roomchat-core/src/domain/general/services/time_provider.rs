// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
