//! Auto-save support for the rule store.
//!
//! Provides:
//! - `DirtyTracker` - Counts unsaved rule changes and their timing
//! - `AutoSaveConfig` - Thresholds deciding when a save is due

mod config;
mod tracker;

pub use config::AutoSaveConfig;
pub use tracker::DirtyTracker;
