//! `bitvault init` — set up the master key for a new vault.

use crate::auth::Authenticator;
use crate::cli::output;
use crate::cli::{open_vault, prompt_new_master_key, Cli, MASTER_KEY_ENV};
use crate::errors::{BitVaultError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (data_dir, mut vault) = open_vault(cli)?;
    let kdf = vault.cipher().kdf().name();
    let mut auth = Authenticator::new(vault.storage_mut());

    // 1. A vault has exactly one master key; refuse to set up twice.
    if auth.master_key_exists()? {
        output::tip("Use `bitvault add` to store credentials in the existing vault.");
        return Err(BitVaultError::VaultAlreadyInitialized);
    }

    // 2. Prompt for the new key (with confirmation) and persist its hash.
    let (candidate, confirmation) = prompt_new_master_key("Choose master key", MASTER_KEY_ENV)?;
    auth.setup(&candidate, &confirmation)?;

    crate::audit::log_audit(&data_dir, "init", None, Some("master key created"));

    output::success(&format!(
        "Vault created at {} (key derivation: {kdf})",
        data_dir.display()
    ));
    output::tip("Run `bitvault add <TITLE> --username <USER>` to add a credential.");
    output::tip("Run `bitvault list` to see all credentials.");

    Ok(())
}
