//! `bitvault show` — display one credential, optionally copying its password.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{BitVaultError, Result};

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str, reveal: bool, copy: bool) -> Result<()> {
    let unlocked = unlock(cli)?;
    let entry = unlocked
        .vault
        .get(id, unlocked.session.key()?)?
        .ok_or_else(|| BitVaultError::EntryNotFound(id.to_string()))?;

    output::print_entry(&entry, reveal);

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| BitVaultError::ClipboardError(e.to_string()))?;
        clipboard
            .set_text(entry.password.as_str())
            .map_err(|e| BitVaultError::ClipboardError(e.to_string()))?;
        output::success("Password copied to clipboard.");
    }

    Ok(())
}
