// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use constant_time_provider::ConstantTimeProvider;
pub use incrementing_id_provider::IncrementingIDProvider;
pub use message_builder::MessageBuilder;
pub use mock_app_dependencies::MockAppDependencies;

pub use crate::composer_event::MockComposerDelegate;


pub mod mock_data {
    pub use super::mock_app_dependencies::{
        mock_reference_date as reference_date, mock_room_id as room_id, mock_user as user,
    };
}
