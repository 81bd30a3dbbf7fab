//! Payload exchanged with the storage backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two independent persistence channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Rendered stylesheet text.
    Css,
    /// JSON array of rule descriptors.
    Style,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Css => "css",
            Channel::Style => "style",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data written to and read back from storage.
///
/// The style channel is written under `styles`; `style` is accepted as an
/// alias when decoding cached payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,

    #[serde(default, alias = "style", skip_serializing_if = "Option::is_none")]
    pub styles: Option<String>,
}

impl StoredPayload {
    /// Payload carrying only stylesheet text.
    pub fn from_css(css: impl Into<String>) -> Self {
        Self {
            css: Some(css.into()),
            styles: None,
        }
    }

    /// Payload carrying only serialized rule descriptors.
    pub fn from_styles(styles: impl Into<String>) -> Self {
        Self {
            css: None,
            styles: Some(styles.into()),
        }
    }

    /// Stylesheet text, if present and non-empty.
    pub fn css(&self) -> Option<&str> {
        self.css.as_deref().filter(|css| !css.is_empty())
    }

    /// Serialized descriptors, if present and non-empty.
    pub fn styles(&self) -> Option<&str> {
        self.styles.as_deref().filter(|styles| !styles.is_empty())
    }

    /// Whether the given channel was assembled into this payload.
    pub fn contains(&self, channel: Channel) -> bool {
        match channel {
            Channel::Css => self.css.is_some(),
            Channel::Style => self.styles.is_some(),
        }
    }

    /// True when neither channel carries data.
    pub fn is_empty(&self) -> bool {
        self.css().is_none() && self.styles().is_none()
    }
}
