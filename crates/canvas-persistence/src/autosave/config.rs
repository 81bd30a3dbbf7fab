//! Auto-save thresholds.

use serde::{Deserialize, Serialize};

/// When an auto-save is due.
///
/// Whether auto-save runs at all is decided by the storage backend
/// ([`crate::StorageManager::is_autosave`]); this only controls timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoSaveConfig {
    /// Number of changes to accumulate before a save is considered.
    pub steps_before_save: usize,

    /// Quiet period in milliseconds after the last change.
    pub debounce_ms: u64,

    /// Upper bound in milliseconds since the first unsaved change.
    ///
    /// Forces a save even while changes keep arriving.
    pub max_delay_ms: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            steps_before_save: 1,
            debounce_ms: 2000,    // 2 seconds
            max_delay_ms: 30_000, // 30 seconds max
        }
    }
}

impl AutoSaveConfig {
    /// Save on every change, without waiting.
    pub fn immediate() -> Self {
        Self {
            steps_before_save: 1,
            debounce_ms: 0,
            max_delay_ms: 0,
        }
    }

    /// Decide whether a save is due.
    pub fn should_save(
        &self,
        pending_changes: usize,
        since_last_change_ms: u64,
        since_first_unsaved_ms: u64,
    ) -> bool {
        if pending_changes == 0 || pending_changes < self.steps_before_save {
            return false;
        }

        since_last_change_ms >= self.debounce_ms || since_first_unsaved_ms >= self.max_delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AutoSaveConfig::default();
        assert_eq!(config.steps_before_save, 1);
        assert_eq!(config.debounce_ms, 2000);
    }

    #[test]
    fn test_nothing_pending() {
        assert!(!AutoSaveConfig::immediate().should_save(0, 10_000, 60_000));
    }

    #[test]
    fn test_steps_threshold() {
        let config = AutoSaveConfig {
            steps_before_save: 3,
            ..AutoSaveConfig::immediate()
        };
        assert!(!config.should_save(2, 0, 0));
        assert!(config.should_save(3, 0, 0));
    }

    #[test]
    fn test_debounce_and_max_delay() {
        let config = AutoSaveConfig::default();

        // Rapid changes within debounce
        assert!(!config.should_save(1, 500, 1000));

        // Quiet long enough
        assert!(config.should_save(1, 2500, 2500));

        // Changes never stop, but max delay passed
        assert!(config.should_save(5, 500, 35_000));
    }
}
