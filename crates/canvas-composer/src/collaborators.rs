//! External services the composer talks to.

use canvas_persistence::StorageManager;

use crate::parser::{BasicCssParser, CssParser};
use crate::store::RuleStore;

/// Receives the rule collection so it can watch for style changes.
pub trait RuleListener {
    fn listen_rules(&mut self, rules: &RuleStore);
}

/// Services handed to [`Composer::init`](crate::Composer::init).
///
/// Storage and listener are optional; the parser defaults to
/// [`BasicCssParser`].
pub struct Collaborators {
    pub(crate) storage: Option<Box<dyn StorageManager>>,
    pub(crate) parser: Box<dyn CssParser>,
    pub(crate) listener: Option<Box<dyn RuleListener>>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            storage: None,
            parser: Box::new(BasicCssParser),
            listener: None,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("storage", &self.storage.as_ref().map(|s| s.config()))
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Collaborators {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_storage(mut self, storage: impl StorageManager + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    #[must_use]
    pub fn with_parser(mut self, parser: impl CssParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    #[must_use]
    pub fn with_listener(mut self, listener: impl RuleListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }
}
