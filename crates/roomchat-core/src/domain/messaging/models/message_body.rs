// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::shared::models::ValidationError;

/// A message carries either text or a single image, never both and never neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageBody {
    Text(TextBody),
    Image(ImageBody),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextBody(String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBody {
    url: Url,
}

impl MessageBody {
    pub fn text(text: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(MessageBody::Text(TextBody::new(text)?))
    }

    pub fn image(url: Url) -> Self {
        MessageBody::Image(ImageBody::new(url))
    }

    pub fn text_content(&self) -> Option<&str> {
        match self {
            MessageBody::Text(body) => Some(body.as_str()),
            MessageBody::Image(_) => None,
        }
    }

    pub fn image_url(&self) -> Option<&Url> {
        match self {
            MessageBody::Text(_) => None,
            MessageBody::Image(body) => Some(body.url()),
        }
    }
}

impl TextBody {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ValidationError::EmptyTextBody);
        }
        Ok(TextBody(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TextBody {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TextBody::new(value)
    }
}

impl From<TextBody> for String {
    fn from(value: TextBody) -> Self {
        value.0
    }
}

impl Display for TextBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ImageBody {
    pub fn new(url: Url) -> Self {
        ImageBody { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}
