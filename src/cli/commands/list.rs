//! `bitvault list` — display credentials in a table.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;
use crate::vault::EntryFilter;

/// Execute the `list` command.
pub fn execute(cli: &Cli, search: Option<&str>, category: Option<&str>) -> Result<()> {
    let unlocked = unlock(cli)?;
    let entries = unlocked.vault.list_all(unlocked.session.key()?)?;

    let mut filter = EntryFilter::new();
    if let Some(q) = search {
        filter = filter.query(q);
    }
    if let Some(c) = category {
        filter = filter.category(c);
    }
    let shown = filter.apply(&entries);

    output::info(&format!(
        "{} of {} credential(s)",
        shown.len(),
        entries.len()
    ));
    output::print_entries_table(&shown);

    Ok(())
}
