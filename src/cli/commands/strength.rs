//! `bitvault strength` — rate a password.

use crate::cli::output;
use crate::cli::read_secret;
use crate::errors::Result;
use crate::generator::evaluate_strength;

/// Execute the `strength` command.
pub fn execute(password: Option<&str>) -> Result<()> {
    let strength = match password {
        Some(pw) => evaluate_strength(pw),
        None => evaluate_strength(&read_secret("Password to rate")?),
    };
    output::print_strength(&strength);
    Ok(())
}
