//! One module per subcommand, each exposing an `execute` function.

pub mod add;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod categories;
pub mod change_key;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod generate;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod show;
pub mod strength;
