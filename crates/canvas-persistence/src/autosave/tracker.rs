//! Unsaved-change tracking for auto-save.

use std::time::Instant;

use super::AutoSaveConfig;

/// Counts rule changes made since the last store.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    /// Changes since the last store.
    pending_changes: usize,

    /// When the most recent change was made.
    last_change: Option<Instant>,

    /// When the first unsaved change was made. Cleared on save.
    first_unsaved_change: Option<Instant>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.pending_changes > 0
    }

    #[inline]
    pub fn pending_changes(&self) -> usize {
        self.pending_changes
    }

    /// Record one change to the rule set.
    pub fn record_change(&mut self) {
        let now = Instant::now();
        self.pending_changes += 1;
        self.last_change = Some(now);
        self.first_unsaved_change.get_or_insert(now);
    }

    /// Forget pending changes after a store or a wholesale reload.
    pub fn mark_saved(&mut self) {
        self.pending_changes = 0;
        self.first_unsaved_change = None;
    }

    /// Milliseconds since the last change.
    pub fn ms_since_last_change(&self) -> Option<u64> {
        self.last_change.map(|t| t.elapsed().as_millis() as u64)
    }

    /// Milliseconds since the first unsaved change.
    pub fn ms_since_first_unsaved(&self) -> Option<u64> {
        self.first_unsaved_change
            .map(|t| t.elapsed().as_millis() as u64)
    }

    /// Check if an auto-save is due under the given thresholds.
    pub fn should_auto_save(&self, config: &AutoSaveConfig) -> bool {
        match (self.ms_since_last_change(), self.ms_since_first_unsaved()) {
            (Some(since_last), Some(since_first)) => {
                config.should_save(self.pending_changes, since_last, since_first)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_tracker_is_clean() {
        let tracker = DirtyTracker::new();
        assert!(!tracker.is_dirty());
        assert_eq!(tracker.pending_changes(), 0);
        assert!(tracker.ms_since_last_change().is_none());
    }

    #[test]
    fn test_record_and_save() {
        let mut tracker = DirtyTracker::new();
        tracker.record_change();
        tracker.record_change();
        assert!(tracker.is_dirty());
        assert_eq!(tracker.pending_changes(), 2);
        assert!(tracker.ms_since_first_unsaved().is_some());

        tracker.mark_saved();
        assert!(!tracker.is_dirty());
        assert!(tracker.ms_since_first_unsaved().is_none());
    }

    #[test]
    fn test_should_auto_save_timing() {
        let mut tracker = DirtyTracker::new();
        let config = AutoSaveConfig {
            debounce_ms: 50, // Short debounce for testing
            ..AutoSaveConfig::default()
        };

        assert!(!tracker.should_auto_save(&config));

        tracker.record_change();
        assert!(!tracker.should_auto_save(&config));

        thread::sleep(Duration::from_millis(60));
        assert!(tracker.should_auto_save(&config));

        tracker.mark_saved();
        assert!(!tracker.should_auto_save(&config));
    }

    #[test]
    fn test_immediate_config_saves_right_away() {
        let mut tracker = DirtyTracker::new();
        tracker.record_change();
        assert!(tracker.should_auto_save(&AutoSaveConfig::immediate()));
    }
}
