//! `bitvault delete` — remove a credential from the vault.

use crate::cli::output;
use crate::cli::{confirm, unlock, Cli};
use crate::errors::{BitVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force && !confirm(&format!("Delete entry '{id}'?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    let mut unlocked = unlock(cli)?;
    let key = unlocked.session.key()?;

    if !unlocked.vault.delete(id, key)? {
        return Err(BitVaultError::EntryNotFound(id.to_string()));
    }

    crate::audit::log_audit(&unlocked.data_dir, "delete", Some(id), None);
    output::success(&format!("Deleted entry '{id}'"));

    Ok(())
}
