//! In-memory session holding the live master key.

use super::MasterKey;
use crate::errors::{BitVaultError, Result};

/// The authenticated state of one user session.
///
/// The master key is never persisted; `logout` drops it and the next
/// login goes back through the authenticator.
#[derive(Debug, Default)]
pub struct Session {
    key: Option<MasterKey>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the authenticated state with a key returned by the authenticator.
    pub fn login(&mut self, key: MasterKey) {
        self.key = Some(key);
    }

    /// Discard the master key.
    pub fn logout(&mut self) {
        self.key = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.key.is_some()
    }

    /// Borrow the live key, or fail with `Locked` after logout.
    pub fn key(&self) -> Result<&MasterKey> {
        self.key.as_ref().ok_or(BitVaultError::Locked)
    }
}
