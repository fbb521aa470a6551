//! `bitvault export` — write a plaintext JSON backup of the vault.
//!
//! Without `--output` the document goes to stdout. `--output` with no
//! value writes `bitvault_backup_<YYYY-MM-DD>.json` in the current directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{BitVaultError, Result};
use crate::vault::backup_file_name;

/// Execute the `export` command.
pub fn execute(cli: &Cli, output_path: Option<Option<&str>>) -> Result<()> {
    let unlocked = unlock(cli)?;
    let key = unlocked.session.key()?;

    let document = unlocked.vault.export(key)?;
    let count = unlocked.vault.list_all(key)?.len();

    crate::audit::log_audit(
        &unlocked.data_dir,
        "export",
        None,
        Some(&format!("{count} entries")),
    );

    match output_path {
        None => {
            // Write to stdout (no success message, just raw output).
            println!("{document}");
        }
        Some(dest) => {
            let dest_path = resolve_destination(dest);
            write_private(&dest_path, &document)?;
            output::success(&format!(
                "Exported {count} entries to {}",
                dest_path.display()
            ));
            output::warning("The backup contains plaintext passwords. Store it securely.");
        }
    }

    Ok(())
}

/// Explicit path, or today's dated backup name.
fn resolve_destination(dest: Option<&str>) -> PathBuf {
    match dest {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(backup_file_name(Local::now().date_naive())),
    }
}

/// Write the backup, owner-readable only on Unix.
fn write_private(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .map_err(|e| BitVaultError::CommandFailed(format!("failed to write export file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
