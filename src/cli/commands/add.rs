//! `bitvault add` — store a new credential.

use crate::cli::output;
use crate::cli::{read_secret, unlock, Cli};
use crate::errors::Result;
use crate::generator::{generate_password, GeneratorOptions};
use crate::vault::NewEntry;

/// Arguments of the `add` command.
pub struct AddArgs<'a> {
    pub title: &'a str,
    pub username: &'a str,
    pub url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub category: Option<&'a str>,
    /// `Some(length)` generates the password instead of prompting.
    pub generate: Option<usize>,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: &AddArgs<'_>) -> Result<()> {
    let mut unlocked = unlock(cli)?;

    let password = match args.generate {
        Some(length) => {
            let options = GeneratorOptions {
                length,
                ..GeneratorOptions::default()
            };
            zeroize::Zeroizing::new(generate_password(&options))
        }
        None => read_secret("Password")?,
    };

    let new = NewEntry {
        title: args.title.to_string(),
        username: args.username.to_string(),
        password: password.to_string(),
        url: non_empty(args.url),
        notes: non_empty(args.notes),
        category: non_empty(args.category),
    };

    let key = unlocked.session.key()?;
    let entry = unlocked.vault.add(new, key)?;

    crate::audit::log_audit(&unlocked.data_dir, "add", Some(&entry.id), None);
    output::success(&format!("Added '{}' with id {}", entry.title, entry.id));
    if args.generate.is_some() {
        output::tip(&format!(
            "Run `bitvault show {} --reveal` to see the generated password.",
            entry.id
        ));
    }

    Ok(())
}

/// Treat blank optional fields as absent.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
