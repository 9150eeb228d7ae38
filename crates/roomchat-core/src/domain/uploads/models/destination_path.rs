// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Display, Formatter};

use mime::Mime;

use crate::domain::general::services::IDProvider;

/// Where a blob is written in the blob store. Generated once per upload job.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DestinationPath(String);

impl DestinationPath {
    /// Generates `<prefix>/<unique id>.<extension>`.
    pub fn generate(
        prefix: &str,
        id_provider: &dyn IDProvider,
        media_type: &Mime,
        fallback_extension: &str,
    ) -> Self {
        let extension = extension_for_media_type(media_type).unwrap_or(fallback_extension);
        let prefix = prefix.trim_matches('/');
        let file_name = format!("{}.{}", id_provider.new_id(), extension);

        if prefix.is_empty() {
            return DestinationPath(file_name);
        }
        DestinationPath(format!("{}/{}", prefix, file_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DestinationPath {
    fn from(value: &str) -> Self {
        DestinationPath(value.to_string())
    }
}

impl Debug for DestinationPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DestinationPath({})", self.0)
    }
}

impl Display for DestinationPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn extension_for_media_type(media_type: &Mime) -> Option<&'static str> {
    if media_type.type_() != mime::IMAGE {
        return None;
    }

    match media_type.subtype().as_str() {
        "jpeg" => Some("jpg"),
        "png" => Some("png"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        _ => mime_guess::get_mime_extensions(media_type).and_then(|exts| exts.first().copied()),
    }
}
