// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use composer_error::ComposerError;
pub use composition_state::{ComposerPhase, CompositionState, Outgoing, UploadTask};

mod composer_error;
mod composition_state;
