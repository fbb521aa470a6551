//! `bitvault categories` — list the categories in use.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `categories` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let unlocked = unlock(cli)?;
    let categories = unlocked.vault.categories(unlocked.session.key()?)?;

    if categories.is_empty() {
        output::info("No credentials yet.");
        return Ok(());
    }

    for category in &categories {
        println!("{category}");
    }

    Ok(())
}
