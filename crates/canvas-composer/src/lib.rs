//! CSS rule composer for the page-building canvas.
//!
//! The composer owns the authoritative rule set of one editor instance. It
//! creates rules on demand without duplicating identities, looks them up by
//! identity, and round-trips the whole set through a storage backend.
//!
//! # Example
//!
//! ```
//! use canvas_composer::{Collaborators, Composer, ComposerConfig};
//! use canvas_model::Selector;
//!
//! let mut composer = Composer::init(ComposerConfig::default(), Collaborators::new())?;
//! let btn = [Selector::class("btn")];
//!
//! composer.add(&btn, Some("hover"), Some("480px")).set_style("color", "red");
//! assert!(composer.get(&btn, Some("hover"), Some("480px")).is_some());
//! assert!(composer.get(&btn, None, Some("480px")).is_none());
//!
//! assert_eq!(
//!     composer.render(),
//!     "@media (max-width: 480px){\n.btn:hover{color:red;}\n}\n"
//! );
//! # Ok::<(), canvas_composer::ComposerError>(())
//! ```
//!
//! # Load and Store
//!
//! [`Composer::store`] assembles a payload for the channels the storage
//! backend enables: `css` carries rendered stylesheet text, `styles` a JSON
//! array of rule descriptors. [`Composer::load`] reads the `styles` channel
//! first and falls back to parsing `css`. Corrupt `styles` data degrades to
//! an empty rule set ([`LoadOutcome::Degraded`]); a stylesheet the parser
//! rejects is an error.
//!
//! # Architecture
//!
//! - `composer.rs` - The `Composer` facade and `LoadOutcome`
//! - `store.rs` - Ordered rule container
//! - `collaborators.rs` - Storage, parser and listener wiring
//! - `parser.rs` / `writer.rs` - Stylesheet text in and out
//! - `config.rs` - Prefixes and initial rules

mod collaborators;
mod composer;
mod config;
mod error;
mod parser;
mod store;
mod writer;

pub use collaborators::{Collaborators, RuleListener};
pub use composer::{Composer, LoadOutcome};
pub use config::{ComposerConfig, DEFAULT_STYLE_PREFIX, InitialRules};
pub use error::{ComposerError, ParseError, Result};
pub use parser::{BasicCssParser, CssParser};
pub use store::RuleStore;
pub use writer::render_css;
