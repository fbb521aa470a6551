//! `bitvault edit` — change fields of an existing credential.
//!
//! Only the fields passed on the command line change. Passing an empty
//! string for `--url`, `--notes` or `--category` clears that field.

use crate::cli::commands::add::non_empty;
use crate::cli::output;
use crate::cli::{read_secret, unlock, Cli};
use crate::errors::{BitVaultError, Result};

/// Arguments of the `edit` command.
#[derive(Default)]
pub struct EditArgs<'a> {
    pub title: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password_prompt: bool,
    pub url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub category: Option<&'a str>,
}

impl EditArgs<'_> {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.username.is_none()
            && !self.password_prompt
            && self.url.is_none()
            && self.notes.is_none()
            && self.category.is_none()
    }
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, id: &str, args: &EditArgs<'_>) -> Result<()> {
    if args.is_empty() {
        output::info("Nothing to change.");
        output::tip("Pass at least one of --title, --username, --password-prompt, --url, --notes, --category.");
        return Ok(());
    }

    let mut unlocked = unlock(cli)?;
    let key = unlocked.session.key()?;

    let mut entry = unlocked
        .vault
        .get(id, key)?
        .ok_or_else(|| BitVaultError::EntryNotFound(id.to_string()))?;

    if let Some(title) = args.title {
        entry.title = title.to_string();
    }
    if let Some(username) = args.username {
        entry.username = username.to_string();
    }
    if args.password_prompt {
        entry.password = read_secret("New password")?.to_string();
    }
    if args.url.is_some() {
        entry.url = non_empty(args.url);
    }
    if args.notes.is_some() {
        entry.notes = non_empty(args.notes);
    }
    if args.category.is_some() {
        entry.category = non_empty(args.category);
    }

    if !unlocked.vault.update(&entry, key)? {
        return Err(BitVaultError::EntryNotFound(id.to_string()));
    }

    crate::audit::log_audit(&unlocked.data_dir, "edit", Some(id), None);
    output::success(&format!("Updated '{}'", entry.title));

    Ok(())
}
