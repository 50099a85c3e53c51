//! Persistent key-value storage capability.
//!
//! # Data Flow
//! ```text
//! auth/token.rs (token + user profile)
//!     → KeyValueStore::get / set / remove
//!     → memory.rs (process lifetime, tests)
//!     → file.rs (JSON file, survives restarts)
//! ```
//!
//! # Design Decisions
//! - Mirrors browser storage: string keys, string values, last write wins
//! - No transactions and no cross-process locking
//! - Backends are swappable behind one small trait

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A string key-value store with get/set/remove semantics.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
