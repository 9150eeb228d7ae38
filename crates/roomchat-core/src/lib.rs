// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use app::deps::AppConfig;
pub use app::services::ComposerService;
pub use composer_builder::ComposerServiceBuilder;
pub use composer_event::{ComposerDelegate, ComposerEvent};

#[cfg(feature = "test")]
pub mod test;

pub mod app;
mod composer_builder;
mod composer_event;
pub mod domain;
pub mod infra;

pub mod dtos {
    pub use crate::domain::composition::models::{
        ComposerPhase, CompositionState, Outgoing, UploadTask,
    };
    pub use crate::domain::messaging::models::{
        ImageBody, Message, MessageAuthor, MessageBody, MessageKey, ServerTimestamp, TextBody,
    };
    pub use crate::domain::shared::models::{RoomId, UserId, UserProfile};
    pub use crate::domain::uploads::models::{
        DestinationPath, SourceFile, UploadJob, UploadJobId, UploadStatus,
    };
}
