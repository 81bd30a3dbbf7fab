//! Composer configuration.

use canvas_model::RuleDescriptor;
use serde::{Deserialize, Serialize};

/// Default prefix for the composer's presentation classes.
pub const DEFAULT_STYLE_PREFIX: &str = "css-";

/// Rules the composer starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialRules {
    /// Stylesheet text, run through the parser at init.
    Css(String),
    /// Ready-made descriptors.
    Descriptors(Vec<RuleDescriptor>),
}

impl Default for InitialRules {
    fn default() -> Self {
        Self::Descriptors(Vec::new())
    }
}

/// Configuration of one composer instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComposerConfig {
    /// Prefix for presentation classes.
    pub style_prefix: String,

    /// Parent prefix, prepended to `style_prefix` when set.
    pub p_style_prefix: Option<String>,

    /// Initial rule population.
    pub rules: InitialRules,

    /// Stylesheet configured on the editor itself. Replaces `rules` when
    /// non-empty.
    pub editor_style: Option<String>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            style_prefix: DEFAULT_STYLE_PREFIX.to_string(),
            p_style_prefix: None,
            rules: InitialRules::default(),
            editor_style: None,
        }
    }
}

impl ComposerConfig {
    /// Config starting from stylesheet text.
    pub fn with_css(css: impl Into<String>) -> Self {
        Self {
            rules: InitialRules::Css(css.into()),
            ..Self::default()
        }
    }

    /// Config starting from descriptors.
    pub fn with_descriptors(descriptors: Vec<RuleDescriptor>) -> Self {
        Self {
            rules: InitialRules::Descriptors(descriptors),
            ..Self::default()
        }
    }

    /// Effective presentation prefix (`p_style_prefix` + `style_prefix`).
    pub fn resolved_style_prefix(&self) -> String {
        match self.p_style_prefix.as_deref() {
            Some(parent) if !parent.is_empty() => format!("{parent}{}", self.style_prefix),
            _ => self.style_prefix.clone(),
        }
    }

    /// Initial rules after applying the editor-level override.
    pub fn resolved_rules(&self) -> InitialRules {
        match self.editor_style.as_deref() {
            Some(css) if !css.is_empty() => InitialRules::Css(css.to_string()),
            _ => self.rules.clone(),
        }
    }
}
