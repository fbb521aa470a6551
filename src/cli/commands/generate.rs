//! `bitvault generate` — print a random password and its strength.

use crate::cli::output;
use crate::errors::Result;
use crate::generator::{evaluate_strength, generate_password, GeneratorOptions};

/// Execute the `generate` command.
pub fn execute(options: &GeneratorOptions) -> Result<()> {
    let password = generate_password(options);
    println!("{password}");
    output::print_strength(&evaluate_strength(&password));
    Ok(())
}
