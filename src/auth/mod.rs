//! Master-key authentication.
//!
//! The vault is in one of two states:
//!
//! - **Setup**: no master-key hash is stored.  `setup` validates a new
//!   key and its confirmation, stores `hash(key)` and unlocks.
//! - **Verify**: a hash exists.  `verify` compares `hash(candidate)`
//!   against it.  There is no attempt counter and no lockout.
//!
//! A successful transition yields a `MasterKey` that lives only in
//! memory (usually inside a `Session`).  The hash is never used to
//! derive encryption keys.

pub mod session;

pub use session::Session;

use std::fmt;

use zeroize::Zeroizing;

use crate::crypto::{hash, verify_hash, Cipher};
use crate::errors::{BitVaultError, Result};
use crate::storage::{KeyValueStore, MASTER_KEY_HASH_KEY, PASSWORDS_KEY};
use crate::vault::CredentialEntry;

/// Minimum master-key length, in characters.
pub const MIN_MASTER_KEY_LEN: usize = 8;

/// Whether a master key has been established yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Setup,
    Verify,
}

/// The live master passphrase, wiped from memory on drop.
#[derive(Clone)]
pub struct MasterKey(Zeroizing<String>);

impl MasterKey {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(Zeroizing::new(passphrase.into()))
    }

    /// Borrow the raw passphrase (e.g. to hand it to the cipher).
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// Gatekeeper for the stored master-key record.
pub struct Authenticator<'a, S: KeyValueStore> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore> Authenticator<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Returns `true` once a master-key hash has been stored.
    pub fn master_key_exists(&self) -> Result<bool> {
        Ok(self.store.get(MASTER_KEY_HASH_KEY)?.is_some())
    }

    /// Current state of the authentication state machine.
    pub fn state(&self) -> Result<AuthState> {
        if self.master_key_exists()? {
            Ok(AuthState::Verify)
        } else {
            Ok(AuthState::Setup)
        }
    }

    /// Establish a new master key (first run).
    ///
    /// Fails if the key is shorter than `MIN_MASTER_KEY_LEN` characters,
    /// if the confirmation differs, or if a key already exists.
    pub fn setup(&mut self, candidate: &str, confirmation: &str) -> Result<MasterKey> {
        if self.master_key_exists()? {
            return Err(BitVaultError::VaultAlreadyInitialized);
        }
        validate_new_key(candidate, confirmation)?;

        self.store.set(MASTER_KEY_HASH_KEY, &hash(candidate))?;
        tracing::info!("master key established");

        Ok(MasterKey::new(candidate))
    }

    /// Check a candidate key against the stored hash.
    pub fn verify(&self, candidate: &str) -> Result<MasterKey> {
        let stored = self
            .store
            .get(MASTER_KEY_HASH_KEY)?
            .ok_or(BitVaultError::VaultNotInitialized)?;

        if verify_hash(candidate, stored.trim()) {
            Ok(MasterKey::new(candidate))
        } else {
            tracing::info!("master key verification failed");
            Err(BitVaultError::AuthenticationFailed)
        }
    }

    /// Run whichever transition the current state calls for.
    ///
    /// In the Setup state a missing `confirmation` counts as a mismatch.
    pub fn authenticate(&mut self, candidate: &str, confirmation: Option<&str>) -> Result<MasterKey> {
        match self.state()? {
            AuthState::Setup => self.setup(candidate, confirmation.unwrap_or_default()),
            AuthState::Verify => self.verify(candidate),
        }
    }

    /// Replace the master key, re-encrypting the vault under the new one.
    ///
    /// Nothing is written until the old key verifies, the new key passes
    /// validation and the existing blob decrypts.  The blob is then
    /// rewritten first and the hash record second.
    pub fn change_master_key(
        &mut self,
        cipher: &Cipher,
        old: &str,
        new: &str,
        confirmation: &str,
    ) -> Result<MasterKey> {
        let old_key = self.verify(old)?;
        validate_new_key(new, confirmation)?;

        if let Some(blob) = self.store.get(PASSWORDS_KEY)? {
            let entries: Vec<CredentialEntry> = cipher
                .decrypt_object(&blob, old_key.expose())
                .ok_or(BitVaultError::DecryptionFailed)?;
            let sealed = cipher.encrypt_object(&entries, new)?;
            self.store.set(PASSWORDS_KEY, &sealed)?;
            tracing::info!(entries = entries.len(), "vault re-encrypted under new master key");
        }

        self.store.set(MASTER_KEY_HASH_KEY, &hash(new))?;
        Ok(MasterKey::new(new))
    }
}

/// Check length and confirmation of a new master key.
pub fn validate_new_key(candidate: &str, confirmation: &str) -> Result<()> {
    if candidate.chars().count() < MIN_MASTER_KEY_LEN {
        return Err(BitVaultError::MasterKeyTooShort {
            min: MIN_MASTER_KEY_LEN,
        });
    }
    if candidate != confirmation {
        return Err(BitVaultError::PasswordMismatch);
    }
    Ok(())
}
