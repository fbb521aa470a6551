use bitvault::cli::commands::{add::AddArgs, edit::EditArgs};
use bitvault::cli::{Cli, Commands};
use bitvault::generator::GeneratorOptions;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr so they never mix with exported JSON on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bitvault=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => bitvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref title,
            ref username,
            ref url,
            ref notes,
            ref category,
            generate,
            length,
        } => bitvault::cli::commands::add::execute(
            &cli,
            &AddArgs {
                title,
                username,
                url: url.as_deref(),
                notes: notes.as_deref(),
                category: category.as_deref(),
                generate: generate.then_some(length),
            },
        ),
        Commands::List {
            ref search,
            ref category,
        } => bitvault::cli::commands::list::execute(&cli, search.as_deref(), category.as_deref()),
        Commands::Show {
            ref id,
            reveal,
            copy,
        } => bitvault::cli::commands::show::execute(&cli, id, reveal, copy),
        Commands::Edit {
            ref id,
            ref title,
            ref username,
            password_prompt,
            ref url,
            ref notes,
            ref category,
        } => bitvault::cli::commands::edit::execute(
            &cli,
            id,
            &EditArgs {
                title: title.as_deref(),
                username: username.as_deref(),
                password_prompt,
                url: url.as_deref(),
                notes: notes.as_deref(),
                category: category.as_deref(),
            },
        ),
        Commands::Delete { ref id, force } => {
            bitvault::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::Categories => bitvault::cli::commands::categories::execute(&cli),
        Commands::Export { ref output } => bitvault::cli::commands::export::execute(
            &cli,
            output.as_ref().map(|dest| dest.as_deref()),
        ),
        Commands::Import { ref file, force } => {
            bitvault::cli::commands::import_cmd::execute(&cli, file, force)
        }
        Commands::Generate {
            length,
            no_uppercase,
            no_lowercase,
            no_numbers,
            no_special,
        } => bitvault::cli::commands::generate::execute(&GeneratorOptions {
            length,
            uppercase: !no_uppercase,
            lowercase: !no_lowercase,
            numbers: !no_numbers,
            special: !no_special,
        }),
        Commands::Strength { ref password } => {
            bitvault::cli::commands::strength::execute(password.as_deref())
        }
        Commands::ChangeKey => bitvault::cli::commands::change_key::execute(&cli),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            bitvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { shell } => bitvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        bitvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
