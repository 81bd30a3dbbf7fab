//! Plain data shape of a rule, as parsed from CSS or stored as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::selector::Selector;

/// Rule descriptor exchanged with parsers and storage.
///
/// JSON shape:
///
/// ```json
/// {"selectors": ["btn", "#main"], "state": "hover", "maxWidth": "480px", "style": {"color": "red"}}
/// ```
///
/// `selectors` is required; the other fields default to empty. Any other
/// shape (non-array selectors, non-string style values, empty selector
/// tokens) fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    pub selectors: Vec<Selector>,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub max_width: String,

    #[serde(default)]
    pub style: BTreeMap<String, String>,
}

impl RuleDescriptor {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self {
            selectors,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    #[must_use]
    pub fn with_max_width(mut self, max_width: impl Into<String>) -> Self {
        self.max_width = max_width.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }
}
