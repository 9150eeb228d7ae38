// roomchat-core/roomchat-core-integration-tests
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

mod composer_upload;
mod helpers;
mod in_memory_composer;
