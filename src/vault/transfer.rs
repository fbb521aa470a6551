//! Portable JSON backups.
//!
//! A backup is a pretty-printed JSON array of entries in exactly the
//! shape they are stored in (ids and timestamps included).  Importing a
//! backup replaces the whole vault: no merge, no duplicate-id check.

use chrono::NaiveDate;

use crate::auth::MasterKey;
use crate::errors::{BitVaultError, Result};
use crate::storage::KeyValueStore;

use super::entry::CredentialEntry;
use super::store::VaultStore;

/// Product prefix used in backup file names.
const BACKUP_PREFIX: &str = "bitvault_backup";

impl<S: KeyValueStore> VaultStore<S> {
    /// Decrypt the vault and render it as a backup document.
    pub fn export(&self, key: &MasterKey) -> Result<String> {
        let entries = self.list_all(key)?;
        serde_json::to_string_pretty(&entries)
            .map_err(|e| BitVaultError::SerializationError(format!("JSON export: {e}")))
    }

    /// Replace the vault with the entries in `document`.
    ///
    /// Returns `Ok(false)` and leaves the vault untouched if the
    /// document is not a JSON array of entries.  Under
    /// `UnreadableVaultPolicy::Reject` an existing blob that `key` cannot
    /// open is an error and is not overwritten.
    pub fn import(&mut self, document: &str, key: &MasterKey) -> Result<bool> {
        let entries = match parse_document(document) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("import rejected: {e}");
                return Ok(false);
            }
        };

        self.replace_all(&entries, key)?;
        Ok(true)
    }
}

/// Parse a backup document into entries.
pub fn parse_document(document: &str) -> Result<Vec<CredentialEntry>> {
    serde_json::from_str(document).map_err(|e| BitVaultError::ImportParse(e.to_string()))
}

/// Conventional backup file name for `date`, e.g. `bitvault_backup_2024-05-01.json`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{BACKUP_PREFIX}_{}.json", date.format("%Y-%m-%d"))
}
