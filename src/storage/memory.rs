//! In-memory `KeyValueStore`, used by tests and as a scratch vault.

use std::collections::HashMap;

use super::{validate_key, KeyValueStore};
use crate::errors::Result;

/// A `HashMap`-backed store that also counts writes.
///
/// The write counter lets callers check that a failed lookup
/// (`update`/`delete` on an unknown id) performed no persistence at all.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` and `remove` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.records.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        if self.records.remove(key).is_some() {
            self.writes += 1;
        }
        Ok(())
    }
}
