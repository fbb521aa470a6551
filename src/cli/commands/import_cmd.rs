//! `bitvault import` — replace the vault with a JSON backup.
//!
//! The import is a whole-vault replace: entries already in the vault and
//! not in the backup are gone afterwards.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{confirm, unlock, Cli};
use crate::errors::{BitVaultError, Result};

/// Execute the `import` command.
pub fn execute(cli: &Cli, file_path: &str, force: bool) -> Result<()> {
    let source = Path::new(file_path);

    if !source.exists() {
        return Err(BitVaultError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    let document = fs::read_to_string(source)
        .map_err(|e| BitVaultError::CommandFailed(format!("failed to read file: {e}")))?;

    let mut unlocked = unlock(cli)?;
    let key = unlocked.session.key()?;

    if !force {
        let existing = unlocked.vault.list_all(key)?.len();
        if existing > 0
            && !confirm(&format!(
                "Replace all {existing} existing entries with the contents of {}?",
                source.display()
            ))?
        {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    if !unlocked.vault.import(&document, key)? {
        return Err(BitVaultError::ImportParse(format!(
            "{} is not a valid BitVault backup",
            source.display()
        )));
    }

    let count = unlocked.vault.list_all(key)?.len();

    crate::audit::log_audit(
        &unlocked.data_dir,
        "import",
        None,
        Some(&format!("{count} entries from {}", source.display())),
    );

    output::success(&format!(
        "Imported {count} entries from {}",
        source.display()
    ));

    Ok(())
}
