// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::messaging::models::SendFailure;
use crate::domain::shared::models::ValidationError;
use crate::domain::uploads::models::UploadFailure;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ComposerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Upload(#[from] UploadFailure),
    #[error(transparent)]
    Send(#[from] SendFailure),
}
