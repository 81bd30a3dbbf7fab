//! Selector tokens and the deduplicated selector set attached to a rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// What a selector token addresses on the canvas.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    /// A class selector (`.name`). Bare tokens are classes.
    #[default]
    Class,
    /// An id selector (`#name`).
    Id,
}

impl SelectorKind {
    /// Returns the CSS prefix character for this kind.
    pub fn prefix(&self) -> char {
        match self {
            SelectorKind::Class => '.',
            SelectorKind::Id => '#',
        }
    }
}

/// A single selector token attached to a rule.
///
/// Descriptors carry selectors either as token strings (`"btn"`, `".btn"`,
/// `"#header"`) or as structured objects (`{"name": "btn", "type": "class"}`).
/// Both decode to the same value. Selectors always serialize back to the
/// token form, so stored payloads stay compact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "SelectorRepr", into = "String")]
pub struct Selector {
    kind: SelectorKind,
    name: String,
}

impl Selector {
    /// Create a class selector from a name known to be valid.
    ///
    /// Untrusted input goes through [`Selector::new`] or [`Selector::parse`].
    /// Debug builds panic on an invalid name.
    pub fn class(name: impl Into<String>) -> Self {
        Self::trusted(SelectorKind::Class, name.into())
    }

    /// Create an id selector from a name known to be valid.
    ///
    /// Same contract as [`Selector::class`].
    pub fn id(name: impl Into<String>) -> Self {
        Self::trusted(SelectorKind::Id, name.into())
    }

    fn trusted(kind: SelectorKind, name: String) -> Self {
        debug_assert!(
            validate_name(&name).is_ok(),
            "invalid selector name {name:?}"
        );
        Self { kind, name }
    }

    /// Create a selector of the given kind, validating the name.
    pub fn new(kind: SelectorKind, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { kind, name })
    }

    /// Parse a selector token.
    ///
    /// `#x` is an id, `.x` and `x` are classes.
    pub fn parse(token: &str) -> Result<Self> {
        let trimmed = token.trim();
        let (kind, name) = if let Some(rest) = trimmed.strip_prefix('#') {
            (SelectorKind::Id, rest)
        } else if let Some(rest) = trimmed.strip_prefix('.') {
            (SelectorKind::Class, rest)
        } else {
            (SelectorKind::Class, trimmed)
        };
        validate_name(name).map_err(|err| match err {
            ModelError::InvalidSelector { reason, .. } => ModelError::InvalidSelector {
                token: token.to_string(),
                reason,
            },
        })?;
        Ok(Self {
            kind,
            name: name.to_string(),
        })
    }

    /// Parse every token, stopping at the first invalid one.
    pub fn parse_all<I, S>(tokens: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| Self::parse(token.as_ref()))
            .collect()
    }

    #[inline]
    pub fn kind(&self) -> SelectorKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token form used in descriptors: `name` for classes, `#name` for ids.
    pub fn to_token(&self) -> String {
        match self.kind {
            SelectorKind::Class => self.name.clone(),
            SelectorKind::Id => format!("#{}", self.name),
        }
    }
}

/// Formats the selector as CSS (`.name` or `#name`).
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.name)
    }
}

impl FromStr for Selector {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_token()
    }
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(ModelError::InvalidSelector {
            token: name.to_string(),
            reason,
        })
    };
    if name.is_empty() {
        return invalid("selector name is empty");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii())
    {
        return invalid("selector name contains characters outside [A-Za-z0-9_-]");
    }
    Ok(())
}

/// Wire shapes accepted for a selector.
#[derive(Deserialize)]
#[serde(untagged)]
enum SelectorRepr {
    Token(String),
    Object {
        name: String,
        #[serde(default, rename = "type")]
        kind: SelectorKind,
    },
}

impl TryFrom<SelectorRepr> for Selector {
    type Error = ModelError;

    fn try_from(repr: SelectorRepr) -> Result<Self> {
        match repr {
            SelectorRepr::Token(token) => Self::parse(&token),
            SelectorRepr::Object { name, kind } => Self::new(kind, name),
        }
    }
}

/// Ordered, deduplicated selectors of one rule.
///
/// Insertion order is kept for serialization, while equality treats the
/// set as unordered: `{a, b}` equals `{b, a}`.
#[derive(Debug, Clone, Default)]
pub struct SelectorSet {
    selectors: Vec<Selector>,
}

impl SelectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selector. Returns `false` if it was already present.
    pub fn insert(&mut self, selector: Selector) -> bool {
        if self.selectors.contains(&selector) {
            return false;
        }
        self.selectors.push(selector);
        true
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        self.selectors.contains(selector)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selector> {
        self.selectors.iter()
    }

    pub fn as_slice(&self) -> &[Selector] {
        &self.selectors
    }

    /// Sorted copy of the selectors, the form used in identity keys.
    pub fn normalized(&self) -> Vec<Selector> {
        normalize(&self.selectors)
    }

    /// Exact set equality against an arbitrary selector list.
    ///
    /// Duplicates in `other` are ignored; order never matters. A subset or
    /// superset does not match.
    pub fn matches(&self, other: &[Selector]) -> bool {
        self.normalized() == normalize(other)
    }
}

/// Sort and deduplicate a selector list.
pub(crate) fn normalize(selectors: &[Selector]) -> Vec<Selector> {
    let mut sorted = selectors.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
}

impl PartialEq for SelectorSet {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.selectors)
    }
}

impl Eq for SelectorSet {}

impl Extend<Selector> for SelectorSet {
    fn extend<T: IntoIterator<Item = Selector>>(&mut self, iter: T) {
        for selector in iter {
            self.insert(selector);
        }
    }
}

impl FromIterator<Selector> for SelectorSet {
    fn from_iter<T: IntoIterator<Item = Selector>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a SelectorSet {
    type Item = &'a Selector;
    type IntoIter = std::slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}
