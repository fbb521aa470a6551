//! Key-value persistence for the vault.
//!
//! The vault keeps exactly two records: the master-key hash and the
//! encrypted credential blob.  Both live behind the `KeyValueStore`
//! trait so the authenticator and the vault store can run against a
//! directory on disk (`FileStore`) or a plain map in tests (`MemoryStore`).

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::{BitVaultError, Result};

/// Storage key holding the hex SHA-256 digest of the master key.
pub const MASTER_KEY_HASH_KEY: &str = "bitvault_master_key_hash";

/// Storage key holding the encrypted credential collection.
pub const PASSWORDS_KEY: &str = "bitvault_passwords";

/// A minimal string-to-string persistence interface.
///
/// Implementations must make `set` a whole-value replace: readers see
/// either the previous value or the new one, never a mix.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`.  Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Validate that a storage key is safe to use as a file name.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty, at most 128 characters, and not start with a period.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.len() > 128 || key.starts_with('.') {
        return Err(BitVaultError::InvalidStorageKey(key.to_string()));
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(BitVaultError::InvalidStorageKey(key.to_string()));
    }
    Ok(())
}
