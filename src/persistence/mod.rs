//! Key-value persistence
//!
//! The browser exposes LocalStorage; tests and native runs use an in-memory
//! map. Both sit behind `ScoreStore` so the session never touches web APIs.

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Why a storage access failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No storage backend (private mode, no window)
    #[error("storage unavailable")]
    Unavailable,
    /// Backend refused the operation (quota, security)
    #[error("storage rejected operation: {0}")]
    Rejected(String),
}

/// String-keyed durable slots
pub trait ScoreStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// Make every write fail (simulates a full or blocked store)
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Rejected("writes disabled".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Parse a stored high score.
///
/// Lenient like the browser's `parseInt`: surrounding whitespace is ignored
/// and trailing garbage after the leading digits is dropped. Returns `None`
/// when there are no leading digits or the value overflows.
pub fn parse_high_score(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// Encode a high score for storage
pub fn format_high_score(value: u64) -> String {
    value.to_string()
}
