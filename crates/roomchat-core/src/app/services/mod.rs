// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use composer_service::ComposerService;
pub(crate) use composer_service::ComposerInner;

mod composer_service;
