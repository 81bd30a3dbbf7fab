//! The storage contract consumed by the composer.

use canvas_model::{Channel, StoredPayload};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Storage settings that decide what gets persisted and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    /// Persist the rendered stylesheet (`css` channel).
    pub store_css: bool,

    /// Persist rule descriptors as JSON (`style` channel).
    pub store_styles: bool,

    /// Load from storage when the composer is initialized.
    pub autoload: bool,

    /// Store automatically after changes.
    pub autosave: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_css: true,
            store_styles: true,
            autoload: true,
            autosave: true,
        }
    }
}

impl StorageConfig {
    /// Config that persists nothing and loads nothing.
    pub fn disabled() -> Self {
        Self {
            store_css: false,
            store_styles: false,
            autoload: false,
            autosave: false,
        }
    }

    /// Active channels, `css` before `style`.
    pub fn channels(&self) -> Vec<Channel> {
        let mut channels = Vec::with_capacity(2);
        if self.store_css {
            channels.push(Channel::Css);
        }
        if self.store_styles {
            channels.push(Channel::Style);
        }
        channels
    }
}

/// Storage backend used by the composer.
pub trait StorageManager {
    /// Current storage settings.
    fn config(&self) -> StorageConfig;

    /// Whether changes should be stored automatically.
    fn is_autosave(&self) -> bool {
        self.config().autosave
    }

    /// Persist a payload.
    ///
    /// The caller does not wait for or inspect the outcome; backends report
    /// their own failures.
    fn store(&mut self, payload: &StoredPayload);

    /// Read the last stored payload.
    fn load_cached(&self) -> Result<StoredPayload>;
}
