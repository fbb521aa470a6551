//! `bitvault change-key` — replace the master key.
//!
//! Verifies the current key, decrypts the vault, re-encrypts it under the
//! new key and finally replaces the stored key hash.

use crate::auth::Authenticator;
use crate::cli::output;
use crate::cli::{open_vault, prompt_master_key, prompt_new_master_key, Cli, NEW_MASTER_KEY_ENV};
use crate::errors::{BitVaultError, Result};

/// Execute the `change-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (data_dir, mut vault) = open_vault(cli)?;
    let cipher = *vault.cipher();

    let new_key = {
        let mut auth = Authenticator::new(vault.storage_mut());
        if !auth.master_key_exists()? {
            return Err(BitVaultError::VaultNotInitialized);
        }

        // 1. Check the current key before asking for a new one.
        output::info("Enter your current master key.");
        let old = prompt_master_key()?;
        if let Err(e) = auth.verify(&old) {
            if matches!(e, BitVaultError::AuthenticationFailed) {
                crate::audit::log_audit(&data_dir, "auth-failed", None, Some("change-key"));
            }
            return Err(e);
        }

        // 2. Prompt for the new key and re-encrypt.
        output::info("Choose your new master key.");
        let (new, confirmation) = prompt_new_master_key("New master key", NEW_MASTER_KEY_ENV)?;
        auth.change_master_key(&cipher, &old, &new, &confirmation)?
    };

    let count = vault.list_all(&new_key)?.len();

    crate::audit::log_audit(
        &data_dir,
        "change-key",
        None,
        Some(&format!("{count} entries re-encrypted")),
    );

    output::success(&format!(
        "Master key changed ({count} entries re-encrypted)"
    ));

    Ok(())
}
