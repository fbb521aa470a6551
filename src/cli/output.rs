//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::generator::{Strength, StrengthLabel};
use crate::vault::filter::category_of;
use crate::vault::CredentialEntry;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of entries (ID, Title, Username, Category, Updated).
pub fn print_entries_table(entries: &[&CredentialEntry]) {
    if entries.is_empty() {
        info("No matching entries.");
        tip("Run `bitvault add <TITLE> --username <USER>` to add a credential.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Username", "Category", "Updated"]);

    for e in entries {
        table.add_row(vec![
            e.id.clone(),
            e.title.clone(),
            e.username.clone(),
            category_of(e).to_string(),
            e.updated_at.format(TIME_FORMAT).to_string(),
        ]);
    }

    println!("{table}");
}

/// Print one entry as a two-column table. The password is masked unless `reveal`.
pub fn print_entry(entry: &CredentialEntry, reveal: bool) {
    let password = if reveal {
        entry.password.clone()
    } else {
        "\u{2022}".repeat(8)
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["ID", entry.id.as_str()]);
    table.add_row(vec!["Title", entry.title.as_str()]);
    table.add_row(vec!["Username", entry.username.as_str()]);
    table.add_row(vec!["Password", password.as_str()]);
    table.add_row(vec!["URL", entry.url.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Category", category_of(entry)]);
    table.add_row(vec!["Notes", entry.notes.as_deref().unwrap_or("-")]);
    let created = entry.created_at.format(TIME_FORMAT).to_string();
    let updated = entry.updated_at.format(TIME_FORMAT).to_string();
    table.add_row(vec!["Created", created.as_str()]);
    table.add_row(vec!["Updated", updated.as_str()]);

    println!("{table}");
}

/// Print a strength rating with its label colored by score.
pub fn print_strength(strength: &Strength) {
    let label = strength.label.to_string();
    let styled = match strength.label {
        StrengthLabel::VeryWeak | StrengthLabel::Weak => style(label).red(),
        StrengthLabel::Fair => style(label).yellow(),
        StrengthLabel::Strong | StrengthLabel::VeryStrong => style(label).green(),
    };
    println!("Strength: {} ({}/5)", styled.bold(), strength.score);
    for hint in &strength.feedback {
        tip(hint);
    }
}
