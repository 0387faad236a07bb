//! Process-wide key-value storage.
//!
//! The cart persists to a single named slot in a key-value store, the way
//! a web client would keep it in local storage. The store is shared mutable
//! state with no locking or versioning across independent handles: writers
//! replace whole values, last writer wins. Callers that need stronger
//! guarantees must coordinate above this layer.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be read or written (missing directory,
    /// permissions, disk full).
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    /// The key is empty or contains characters the backend cannot map to a
    /// slot name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Synchronous key-value storage.
///
/// All operations complete without suspension; there is no async surface.
/// Implementations must be shareable across threads, but `get`/`put` pairs
/// are NOT atomic with respect to other handles on the same underlying
/// store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if the slot is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the slot for `key`. Removing an absent slot is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Validate that a key maps cleanly onto every backend's slot naming.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
