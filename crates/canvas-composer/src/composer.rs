//! The composer facade: dedup protocol and the load/store bridge.

use canvas_model::{Channel, CssRule, RuleDescriptor, Selector, StoredPayload};
use canvas_persistence::{AutoSaveConfig, DirtyTracker, StorageManager};

use crate::collaborators::Collaborators;
use crate::config::{ComposerConfig, InitialRules};
use crate::error::{ComposerError, Result};
use crate::store::RuleStore;
use crate::writer::render_css;

/// What a call to [`Composer::load`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The payload carried nothing; the store is now empty.
    Empty,

    /// Rules were read from one channel.
    Loaded {
        channel: Channel,
        descriptors: Vec<RuleDescriptor>,
    },

    /// The channel data could not be decoded; the store is now empty.
    Degraded { channel: Channel, reason: String },
}

impl LoadOutcome {
    /// Descriptors the store was reset with.
    pub fn descriptors(&self) -> &[RuleDescriptor] {
        match self {
            LoadOutcome::Loaded { descriptors, .. } => descriptors,
            LoadOutcome::Empty | LoadOutcome::Degraded { .. } => &[],
        }
    }

    pub fn channel(&self) -> Option<Channel> {
        match self {
            LoadOutcome::Empty => None,
            LoadOutcome::Loaded { channel, .. } | LoadOutcome::Degraded { channel, .. } => {
                Some(*channel)
            }
        }
    }

    #[inline]
    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadOutcome::Degraded { .. })
    }
}

/// Owns the rule set of one editor instance.
///
/// [`add`](Self::add) is the only entry point that enforces one rule per
/// identity; raw access through [`get_all_mut`](Self::get_all_mut) can
/// introduce duplicates, which [`get`](Self::get) then masks by returning
/// the first match.
#[derive(Debug)]
pub struct Composer {
    config: ComposerConfig,
    style_prefix: String,
    rules: RuleStore,
    collaborators: Collaborators,
    tracker: DirtyTracker,
}

impl Composer {
    /// Build a composer and populate it.
    ///
    /// Initial rules come from the config (stylesheet text goes through the
    /// parser). When storage is configured with `autoload`, the cached
    /// payload then replaces them. In autosave mode the listener is
    /// subscribed to the resulting rule set.
    pub fn init(config: ComposerConfig, collaborators: Collaborators) -> Result<Self> {
        let style_prefix = config.resolved_style_prefix();
        let initial = match config.resolved_rules() {
            InitialRules::Css(css) if css.trim().is_empty() => Vec::new(),
            InitialRules::Css(css) => collaborators.parser.parse_css(&css)?,
            InitialRules::Descriptors(descriptors) => descriptors,
        };

        let mut composer = Self {
            config,
            style_prefix,
            rules: RuleStore::from_descriptors(&initial),
            collaborators,
            tracker: DirtyTracker::new(),
        };

        let (autoload, autosave) = match composer.collaborators.storage.as_deref() {
            Some(storage) => (storage.config().autoload, storage.is_autosave()),
            None => (false, false),
        };
        if autoload {
            composer.load(None)?;
        }
        if autosave && let Some(listener) = composer.collaborators.listener.as_deref_mut() {
            listener.listen_rules(&composer.rules);
        }

        tracing::debug!(
            rules = composer.rules.len(),
            prefix = %composer.style_prefix,
            autoload,
            autosave,
            "Composer initialized"
        );
        Ok(composer)
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Effective prefix for presentation classes.
    pub fn style_prefix(&self) -> &str {
        &self.style_prefix
    }

    pub fn storage(&self) -> Option<&dyn StorageManager> {
        self.collaborators.storage.as_deref()
    }

    /// Index of the first rule with the given identity.
    pub fn position(
        &self,
        selectors: &[Selector],
        state: Option<&str>,
        width: Option<&str>,
    ) -> Option<usize> {
        self.rules
            .iter()
            .position(|rule| rule.compare(selectors, state, width))
    }

    /// First rule with the given identity.
    pub fn get(
        &self,
        selectors: &[Selector],
        state: Option<&str>,
        width: Option<&str>,
    ) -> Option<&CssRule> {
        self.position(selectors, state, width)
            .map(|index| &self.rules[index])
    }

    /// Mutable form of [`get`](Self::get). Counts as a change.
    pub fn get_mut(
        &mut self,
        selectors: &[Selector],
        state: Option<&str>,
        width: Option<&str>,
    ) -> Option<&mut CssRule> {
        let index = self.position(selectors, state, width)?;
        self.tracker.record_change();
        Some(&mut self.rules[index])
    }

    /// Return the rule with the given identity, creating it if absent.
    ///
    /// An existing rule is returned untouched, styles included.
    pub fn add(
        &mut self,
        selectors: &[Selector],
        state: Option<&str>,
        width: Option<&str>,
    ) -> &mut CssRule {
        let state = state.unwrap_or_default();
        let width = width.unwrap_or_default();

        if let Some(index) = self.position(selectors, Some(state), Some(width)) {
            tracing::trace!(index, "Rule already present");
            return &mut self.rules[index];
        }

        let mut rule = CssRule::new(state, width);
        rule.selectors.extend(selectors.iter().cloned());
        tracing::debug!(key = %rule.key(), "Adding rule");
        self.tracker.record_change();
        self.rules.push(rule)
    }

    /// The live rule collection.
    pub fn get_all(&self) -> &RuleStore {
        &self.rules
    }

    /// Raw mutable access to the collection. Counts as a change; appends
    /// made here are not deduplicated.
    pub fn get_all_mut(&mut self) -> &mut RuleStore {
        self.tracker.record_change();
        &mut self.rules
    }

    /// Note an edit made through a reference obtained earlier.
    pub fn record_change(&mut self) {
        self.tracker.record_change();
    }

    /// Whether changes were made since the last store or load.
    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Replace the rule set with stored data.
    ///
    /// With `data` absent, the cached payload is read from storage; read
    /// failures propagate. The `styles` channel takes precedence over
    /// `css`. Undecodable `styles` data yields [`LoadOutcome::Degraded`]
    /// and an empty store, while a `css` parse failure is returned as
    /// [`ComposerError::Parse`] and leaves the store untouched.
    pub fn load(&mut self, data: Option<StoredPayload>) -> Result<LoadOutcome> {
        let payload = match (data, self.collaborators.storage.as_deref()) {
            (Some(payload), _) => payload,
            (None, Some(storage)) => storage.load_cached()?,
            (None, None) => StoredPayload::default(),
        };

        let outcome = if let Some(styles) = payload.styles() {
            match serde_json::from_str::<Vec<RuleDescriptor>>(styles) {
                Ok(descriptors) => LoadOutcome::Loaded {
                    channel: Channel::Style,
                    descriptors,
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Stored styles could not be decoded, starting empty");
                    LoadOutcome::Degraded {
                        channel: Channel::Style,
                        reason: e.to_string(),
                    }
                }
            }
        } else if let Some(css) = payload.css() {
            LoadOutcome::Loaded {
                channel: Channel::Css,
                descriptors: self.collaborators.parser.parse_css(css)?,
            }
        } else {
            LoadOutcome::Empty
        };

        self.rules.reset(outcome.descriptors());
        self.tracker.mark_saved();
        tracing::info!(
            rules = self.rules.len(),
            channel = ?outcome.channel(),
            degraded = outcome.is_degraded(),
            "Loaded rules"
        );
        Ok(outcome)
    }

    /// Assemble the payload for the active channels and hand it to storage.
    ///
    /// Returns `None` without storage. With `skip_persist` the payload is
    /// only assembled.
    pub fn store(&mut self, skip_persist: bool) -> Result<Option<StoredPayload>> {
        let Some(config) = self.storage().map(|storage| storage.config()) else {
            return Ok(None);
        };

        let mut payload = StoredPayload::default();
        if config.store_css {
            payload.css = Some(self.render());
        }
        if config.store_styles {
            let styles = serde_json::to_string(&self.rules.descriptors())
                .map_err(|source| ComposerError::Encode { source })?;
            payload.styles = Some(styles);
        }

        if !skip_persist && let Some(storage) = self.collaborators.storage.as_deref_mut() {
            storage.store(&payload);
            self.tracker.mark_saved();
            tracing::info!(
                rules = self.rules.len(),
                css = payload.css.is_some(),
                styles = payload.styles.is_some(),
                "Stored rules"
            );
        }
        Ok(Some(payload))
    }

    /// Store if the backend is in autosave mode and a save is due.
    pub fn autosave_if_due(&mut self, thresholds: &AutoSaveConfig) -> Result<Option<StoredPayload>> {
        let autosave = self.storage().is_some_and(|storage| storage.is_autosave());
        if !autosave || !self.tracker.should_auto_save(thresholds) {
            return Ok(None);
        }
        tracing::debug!(pending = self.tracker.pending_changes(), "Auto-saving rules");
        self.store(false)
    }

    /// Active persistence channels, `css` before `style`.
    pub fn storage_key(&self) -> Vec<Channel> {
        self.storage()
            .map(|storage| storage.config().channels())
            .unwrap_or_default()
    }

    /// The rule set as stylesheet text.
    pub fn render(&self) -> String {
        render_css(&self.rules)
    }
}
