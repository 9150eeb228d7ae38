// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub mod composition;
pub mod general;
pub mod messaging;
pub mod session;
pub mod shared;
pub mod uploads;
