// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use mime::Mime;

/// A local file selected for upload. The bytes are shared and never modified.
#[derive(Clone, PartialEq)]
pub struct SourceFile {
    name: String,
    media_type: Mime,
    data: Arc<[u8]>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, media_type: Mime, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            media_type,
            data: data.into(),
        }
    }

    /// Guesses the media type from the extension of `name`.
    pub fn with_guessed_media_type(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let media_type = mime_guess::from_path(&name).first_or_octet_stream();
        Self::new(name, media_type, data)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(Self::with_guessed_media_type(name, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &Mime {
        &self.media_type
    }

    pub fn data(&self) -> &Arc<[u8]> {
        &self.data
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type.essence_str())
            .field("size", &self.data.len())
            .finish()
    }
}
