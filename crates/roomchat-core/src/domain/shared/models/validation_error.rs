// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

/// Malformed message input. These are prevented by the types wherever possible, so seeing one at
/// runtime points to a programming error in the caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("User id must not be empty.")]
    EmptyUserId,
    #[error("Text body must not be empty.")]
    EmptyTextBody,
    #[error("No user is signed in.")]
    MissingAuthor,
}
