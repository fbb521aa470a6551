//! Project configuration (`.bitvault.toml`).

pub mod settings;

pub use settings::{KdfChoice, Settings, UnreadableVault};
