//! CLI module — Clap argument parser, prompts, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::auth::{validate_new_key, Authenticator, Session, MIN_MASTER_KEY_LEN};
use crate::config::Settings;
use crate::errors::{BitVaultError, Result};
use crate::storage::FileStore;
use crate::vault::VaultStore;

/// Environment variable holding the master key for scripted use.
pub const MASTER_KEY_ENV: &str = "BITVAULT_MASTER_KEY";

/// Environment variable holding the replacement key for scripted `change-key`.
pub const NEW_MASTER_KEY_ENV: &str = "BITVAULT_NEW_MASTER_KEY";

/// BitVault CLI: local-first encrypted password vault.
#[derive(Parser)]
#[command(name = "bitvault", about = "Encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault data directory (default: `data_dir` from .bitvault.toml, else .bitvault)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set up the master key for a new vault
    Init,

    /// Add a credential
    Add {
        /// Title shown in listings (e.g. "GitHub")
        title: String,
        /// Account username or email
        #[arg(short, long)]
        username: String,
        /// Site URL
        #[arg(long)]
        url: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Category used for grouping
        #[arg(short, long)]
        category: Option<String>,
        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated password
        #[arg(long, default_value_t = crate::generator::DEFAULT_LENGTH)]
        length: usize,
    },

    /// List credentials
    List {
        /// Case-insensitive search over title, username, url and notes
        #[arg(short, long)]
        search: Option<String>,
        /// Only show entries in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show a single credential
    Show {
        /// Entry id
        id: String,
        /// Print the password in clear text
        #[arg(short, long)]
        reveal: bool,
        /// Copy the password to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Edit a credential
    Edit {
        /// Entry id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        username: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        password_prompt: bool,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a credential
    Delete {
        /// Entry id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List the categories in use
    Categories,

    /// Export all credentials as a JSON backup
    Export {
        /// Write to a file instead of stdout (no value: bitvault_backup_<date>.json)
        #[arg(short, long, num_args = 0..=1)]
        output: Option<Option<String>>,
    },

    /// Replace the vault with the contents of a JSON backup
    Import {
        /// Path to the backup file
        file: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password
    Generate {
        #[arg(short, long, default_value_t = crate::generator::DEFAULT_LENGTH)]
        length: usize,
        #[arg(long)]
        no_uppercase: bool,
        #[arg(long)]
        no_lowercase: bool,
        #[arg(long)]
        no_numbers: bool,
        #[arg(long)]
        no_special: bool,
    },

    /// Rate the strength of a password
    Strength {
        /// Password to rate (prompted when omitted)
        password: Option<String>,
    },

    /// Change the master key and re-encrypt the vault
    ChangeKey,

    /// View the audit log of vault operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the data directory: `--data-dir` wins, then `.bitvault.toml`.
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match &cli.data_dir {
        Some(dir) => Ok(cwd.join(dir)),
        None => Ok(Settings::load(&cwd)?.data_path(&cwd)),
    }
}

/// Open the on-disk vault configured for the current project.
pub fn open_vault(cli: &Cli) -> Result<(PathBuf, VaultStore<FileStore>)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let dir = match &cli.data_dir {
        Some(dir) => cwd.join(dir),
        None => settings.data_path(&cwd),
    };
    let storage = FileStore::open(&dir)?;
    let vault = VaultStore::new(storage)
        .with_cipher(settings.cipher())
        .with_policy(settings.unreadable_policy());
    Ok((dir, vault))
}

/// An opened vault plus an authenticated session.
pub struct Unlocked {
    pub data_dir: PathBuf,
    pub vault: VaultStore<FileStore>,
    pub session: Session,
}

/// Open the vault and verify the master key before anything touches it.
///
/// A wrong key is recorded in the audit log as `auth-failed`.
pub fn unlock(cli: &Cli) -> Result<Unlocked> {
    let (data_dir, mut vault) = open_vault(cli)?;

    let auth = Authenticator::new(vault.storage_mut());
    if !auth.master_key_exists()? {
        return Err(BitVaultError::VaultNotInitialized);
    }

    let candidate = prompt_master_key()?;
    let key = match auth.verify(&candidate) {
        Ok(key) => key,
        Err(e) => {
            if matches!(e, BitVaultError::AuthenticationFailed) {
                crate::audit::log_audit(&data_dir, "auth-failed", None, None);
            }
            return Err(e);
        }
    };

    let mut session = Session::new();
    session.login(key);

    Ok(Unlocked {
        data_dir,
        vault,
        session,
    })
}

/// Get the master key, trying in order:
/// 1. `BITVAULT_MASTER_KEY` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the key is wiped from memory on drop.
pub fn prompt_master_key() -> Result<Zeroizing<String>> {
    if let Ok(key) = std::env::var(MASTER_KEY_ENV) {
        if !key.is_empty() {
            return Ok(Zeroizing::new(key));
        }
    }

    let key = dialoguer::Password::new()
        .with_prompt("Enter master key")
        .interact()
        .map_err(|e| BitVaultError::CommandFailed(format!("master key prompt: {e}")))?;
    Ok(Zeroizing::new(key))
}

/// Prompt for a new master key with confirmation (used by `init` and `change-key`).
///
/// A non-empty `env_var` is accepted as both key and confirmation.
/// Returns the key twice so callers can hand both to the authenticator.
pub fn prompt_new_master_key(
    prompt: &str,
    env_var: &str,
) -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    if let Ok(key) = std::env::var(env_var) {
        if !key.is_empty() {
            return Ok((Zeroizing::new(key.clone()), Zeroizing::new(key)));
        }
    }

    loop {
        let candidate = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(prompt)
                .interact()
                .map_err(|e| BitVaultError::CommandFailed(format!("master key prompt: {e}")))?,
        );
        let confirmation = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Confirm master key")
                .interact()
                .map_err(|e| BitVaultError::CommandFailed(format!("master key prompt: {e}")))?,
        );

        match validate_new_key(&candidate, &confirmation) {
            Ok(()) => return Ok((candidate, confirmation)),
            Err(BitVaultError::MasterKeyTooShort { .. }) => output::warning(&format!(
                "Master key must be at least {MIN_MASTER_KEY_LEN} characters. Try again."
            )),
            Err(BitVaultError::PasswordMismatch) => {
                output::warning("Master keys do not match. Try again.");
            }
            Err(e) => return Err(e),
        }
    }
}

/// Read a credential password: first line of stdin when piped, else a hidden prompt.
pub fn read_secret(prompt: &str) -> Result<Zeroizing<String>> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        let mut line = Zeroizing::new(String::new());
        stdin.lock().read_line(&mut line)?;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            return Err(BitVaultError::CommandFailed(
                "no password received on stdin".into(),
            ));
        }
        return Ok(Zeroizing::new(trimmed.to_string()));
    }

    let secret = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| BitVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| BitVaultError::CommandFailed(format!("confirm prompt: {e}")))
}
