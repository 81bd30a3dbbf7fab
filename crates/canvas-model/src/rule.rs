//! A single style rule and its identity key.

use std::collections::BTreeMap;
use std::fmt;

use crate::descriptor::RuleDescriptor;
use crate::selector::{Selector, SelectorSet, normalize};

/// One style rule on the canvas.
///
/// Style edits happen in place through a mutable reference handed out by
/// the composer; identity fields should not be changed after the rule is
/// stored, since lookups rely on them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssRule {
    /// Selectors this rule applies to. Empty for catch-all rules.
    pub selectors: SelectorSet,

    /// Pseudo-state (e.g. `hover`). Empty means no state.
    pub state: String,

    /// Responsive breakpoint (e.g. `480px`). Empty means unconstrained.
    pub max_width: String,

    /// Property -> value declarations.
    pub style: BTreeMap<String, String>,
}

impl CssRule {
    /// Create an empty rule for the given state and breakpoint.
    pub fn new(state: impl Into<String>, max_width: impl Into<String>) -> Self {
        Self {
            selectors: SelectorSet::new(),
            state: state.into(),
            max_width: max_width.into(),
            style: BTreeMap::new(),
        }
    }

    /// Check whether this rule has the given identity.
    ///
    /// `None` and `Some("")` are equivalent for both state and width.
    /// Selectors must match exactly as an unordered set.
    pub fn compare(&self, selectors: &[Selector], state: Option<&str>, width: Option<&str>) -> bool {
        self.state == state.unwrap_or("")
            && self.max_width == width.unwrap_or("")
            && self.selectors.matches(selectors)
    }

    /// Identity key of this rule.
    pub fn key(&self) -> RuleKey {
        RuleKey {
            selectors: self.selectors.normalized(),
            state: self.state.clone(),
            max_width: self.max_width.clone(),
        }
    }

    /// Set a style property, returning the previous value.
    pub fn set_style(
        &mut self,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.style.insert(property.into(), value.into())
    }

    /// Remove a style property, returning its value.
    pub fn remove_style(&mut self, property: &str) -> Option<String> {
        self.style.remove(property)
    }

    /// CSS selector text without the media wrapper, e.g. `.btn.primary:hover`.
    pub fn selector_text(&self) -> String {
        let mut text: String = self.selectors.iter().map(ToString::to_string).collect();
        if !self.state.is_empty() {
            text.push(':');
            text.push_str(&self.state);
        }
        text
    }

    /// Snapshot this rule as a plain descriptor.
    pub fn to_descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            selectors: self.selectors.as_slice().to_vec(),
            state: self.state.clone(),
            max_width: self.max_width.clone(),
            style: self.style.clone(),
        }
    }
}

impl From<RuleDescriptor> for CssRule {
    fn from(descriptor: RuleDescriptor) -> Self {
        Self {
            selectors: descriptor.selectors.into_iter().collect(),
            state: descriptor.state,
            max_width: descriptor.max_width,
            style: descriptor.style,
        }
    }
}

impl From<&RuleDescriptor> for CssRule {
    fn from(descriptor: &RuleDescriptor) -> Self {
        Self::from(descriptor.clone())
    }
}

/// Identity of a rule: sorted selectors, state and breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleKey {
    pub selectors: Vec<Selector>,
    pub state: String,
    pub max_width: String,
}

impl RuleKey {
    /// Build a key from lookup arguments, normalizing missing values.
    pub fn new(selectors: &[Selector], state: Option<&str>, width: Option<&str>) -> Self {
        Self {
            selectors: normalize(selectors),
            state: state.unwrap_or_default().to_string(),
            max_width: width.unwrap_or_default().to_string(),
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for selector in &self.selectors {
            write!(f, "{selector}")?;
        }
        if !self.state.is_empty() {
            write!(f, ":{}", self.state)?;
        }
        if !self.max_width.is_empty() {
            write!(f, " @ {}", self.max_width)?;
        }
        Ok(())
    }
}
