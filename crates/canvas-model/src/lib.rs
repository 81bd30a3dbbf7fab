//! CSS rule data model for the page-building canvas.
//!
//! This crate provides the types shared by the composer and the storage
//! layer:
//!
//! - **Selectors** attached to a rule ([`Selector`], [`SelectorSet`])
//! - **Rules** with their identity key ([`CssRule`], [`RuleKey`])
//! - **Descriptors**, the plain data shape rules are parsed from and
//!   serialized to ([`RuleDescriptor`])
//! - **Payloads** exchanged with a storage backend ([`StoredPayload`], [`Channel`])
//!
//! # Rule Identity
//!
//! A rule is identified by its selector set (compared as an unordered set),
//! its pseudo-state and its `max-width` breakpoint. Style contents never take
//! part in identity.
//!
//! ```
//! use canvas_model::{CssRule, Selector};
//!
//! let mut rule = CssRule::new("hover", "480px");
//! rule.selectors.insert(Selector::class("btn"));
//! rule.selectors.insert(Selector::class("primary"));
//!
//! let lookup = [Selector::class("primary"), Selector::class("btn")];
//! assert!(rule.compare(&lookup, Some("hover"), Some("480px")));
//! assert!(!rule.compare(&lookup, None, Some("480px")));
//! ```

pub mod descriptor;
pub mod error;
pub mod payload;
pub mod rule;
pub mod selector;

pub use descriptor::RuleDescriptor;
pub use error::{ModelError, Result};
pub use payload::{Channel, StoredPayload};
pub use rule::{CssRule, RuleKey};
pub use selector::{Selector, SelectorKind, SelectorSet};
