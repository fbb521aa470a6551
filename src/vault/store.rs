//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` owns the encrypted credential collection.  Every
//! operation takes the live master key, reads the whole blob, and every
//! successful mutation re-encrypts and writes the whole collection
//! exactly once.  A lookup miss on `update`/`delete` writes nothing.
//!
//! There is no cross-process coordination: two writers race and the
//! last whole-blob write wins.

use crate::auth::MasterKey;
use crate::crypto::Cipher;
use crate::errors::{BitVaultError, Result};
use crate::storage::{KeyValueStore, PASSWORDS_KEY};

use super::entry::{self, CredentialEntry, NewEntry};
use super::filter;

/// What `list_all` does with a blob that exists but cannot be decrypted
/// (wrong key or corrupted data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnreadableVaultPolicy {
    /// Report an empty vault.  Wrong key, missing vault and corrupted
    /// data are indistinguishable to the caller.
    #[default]
    TreatAsEmpty,
    /// Fail with `DecryptionFailed`.  Mutations also refuse to run, so
    /// an unreadable blob is never overwritten.
    Reject,
}

/// The main vault handle.
pub struct VaultStore<S: KeyValueStore> {
    storage: S,
    cipher: Cipher,
    policy: UnreadableVaultPolicy,
}

impl<S: KeyValueStore> VaultStore<S> {
    /// Wrap a storage backend with the default cipher and policy.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            cipher: Cipher::default(),
            policy: UnreadableVaultPolicy::default(),
        }
    }

    /// Use `cipher` for every new blob written by this store.
    pub fn with_cipher(mut self, cipher: Cipher) -> Self {
        self.cipher = cipher;
        self
    }

    pub fn with_policy(mut self, policy: UnreadableVaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Decrypt and return every entry, in insertion order.
    ///
    /// A vault that was never written is empty.  An undecryptable blob
    /// is handled according to the store's `UnreadableVaultPolicy`.
    pub fn list_all(&self, key: &MasterKey) -> Result<Vec<CredentialEntry>> {
        let Some(blob) = self.storage.get(PASSWORDS_KEY)? else {
            return Ok(Vec::new());
        };

        match self.cipher.decrypt_object(&blob, key.expose()) {
            Some(entries) => Ok(entries),
            None => match self.policy {
                UnreadableVaultPolicy::TreatAsEmpty => {
                    tracing::debug!("vault blob unreadable, treating as empty");
                    Ok(Vec::new())
                }
                UnreadableVaultPolicy::Reject => Err(BitVaultError::DecryptionFailed),
            },
        }
    }

    /// Look up a single entry by id.
    pub fn get(&self, id: &str, key: &MasterKey) -> Result<Option<CredentialEntry>> {
        Ok(self.list_all(key)?.into_iter().find(|e| e.id == id))
    }

    /// Distinct categories across the vault.
    pub fn categories(&self, key: &MasterKey) -> Result<Vec<String>> {
        Ok(filter::categories(&self.list_all(key)?))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Add a new entry, assigning a fresh id and timestamps.
    pub fn add(&mut self, new: NewEntry, key: &MasterKey) -> Result<CredentialEntry> {
        let mut entries = self.list_all(key)?;

        let mut id = entry::generate_id();
        while entries.iter().any(|e| e.id == id) {
            id = entry::generate_id();
        }

        let created = CredentialEntry::from_new(new, id, entry::now());
        entries.push(created.clone());
        self.persist(&entries, key)?;

        tracing::info!(id = %created.id, total = entries.len(), "entry added");
        Ok(created)
    }

    /// Replace the fields of the entry with the same id.
    ///
    /// Returns `Ok(false)` without writing if no entry has that id.  The
    /// stored `created_at` is kept; `updated_at` moves strictly forward.
    pub fn update(&mut self, changed: &CredentialEntry, key: &MasterKey) -> Result<bool> {
        let mut entries = self.list_all(key)?;

        let Some(existing) = entries.iter_mut().find(|e| e.id == changed.id) else {
            tracing::debug!(id = %changed.id, "update skipped, no such entry");
            return Ok(false);
        };

        let replacement = CredentialEntry {
            id: existing.id.clone(),
            created_at: existing.created_at,
            updated_at: entry::next_timestamp(existing.updated_at),
            ..changed.clone()
        };
        *existing = replacement;

        self.persist(&entries, key)?;
        tracing::info!(id = %changed.id, "entry updated");
        Ok(true)
    }

    /// Remove the entry with `id`.
    ///
    /// Returns `Ok(false)` without writing if no entry has that id.
    pub fn delete(&mut self, id: &str, key: &MasterKey) -> Result<bool> {
        let mut entries = self.list_all(key)?;

        let Some(index) = entries.iter().position(|e| e.id == id) else {
            tracing::debug!(id, "delete skipped, no such entry");
            return Ok(false);
        };
        entries.remove(index);

        self.persist(&entries, key)?;
        tracing::info!(id, total = entries.len(), "entry deleted");
        Ok(true)
    }

    /// Overwrite the whole collection with `entries`, verbatim.
    ///
    /// Under `Reject` an existing blob must decrypt with `key` first.
    pub fn replace_all(&mut self, entries: &[CredentialEntry], key: &MasterKey) -> Result<()> {
        if self.policy == UnreadableVaultPolicy::Reject {
            self.list_all(key)?;
        }
        self.persist(entries, key)?;
        tracing::info!(total = entries.len(), "vault replaced");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encrypt the full collection and write it in one `set`.
    fn persist(&mut self, entries: &[CredentialEntry], key: &MasterKey) -> Result<()> {
        let sealed = self.cipher.encrypt_object(entries, key.expose())?;
        self.storage.set(PASSWORDS_KEY, &sealed)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Give the storage backend back (e.g. to run the authenticator on it).
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn cipher(&self) -> &Cipher {
        &self.cipher
    }

    pub fn policy(&self) -> UnreadableVaultPolicy {
        self.policy
    }
}
