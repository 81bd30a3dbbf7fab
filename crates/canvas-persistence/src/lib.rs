//! Storage backends for canvas CSS rules.
//!
//! The composer never talks to disk directly. It goes through the
//! [`StorageManager`] contract, which exposes the storage configuration,
//! the auto-save flag, a write operation and a read of the last stored
//! payload.
//!
//! # Features
//!
//! - **Channel selection** via [`StorageConfig`] (`css` text and/or `style` JSON)
//! - **In-memory backend** ([`MemoryStorage`]) for embedding and tests
//! - **File backend** ([`FileStorage`]) with atomic writes
//! - **Auto-save** tracking with change counting and debounce
//!
//! # Example
//!
//! ```ignore
//! use canvas_persistence::{FileStorage, StorageManager};
//!
//! let mut storage = FileStorage::new("canvas-styles.json");
//! let cached = storage.load_cached()?;
//! storage.save(&cached)?;
//! ```
//!
//! # Architecture
//!
//! - `manager.rs` - The `StorageManager` trait and `StorageConfig`
//! - `backend/` - Memory and file implementations
//! - `autosave/` - Change tracking (DirtyTracker, config)
//! - `error.rs` - Error types with user-friendly messages

mod autosave;
mod backend;
mod error;
mod manager;

pub use autosave::{AutoSaveConfig, DirtyTracker};
pub use backend::{FileStorage, MemoryStorage};
pub use error::{PersistenceError, Result};
pub use manager::{StorageConfig, StorageManager};
