//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - `CredentialEntry` and `NewEntry` types (`entry`)
//! - The whole-collection `VaultStore` (`store`)
//! - JSON backup import/export (`transfer`)
//! - Search and category filtering (`filter`)

pub mod entry;
pub mod filter;
pub mod store;
pub mod transfer;

// Re-export the most commonly used items.
pub use entry::{CredentialEntry, NewEntry};
pub use filter::{EntryFilter, UNCATEGORIZED};
pub use store::{UnreadableVaultPolicy, VaultStore};
pub use transfer::{backup_file_name, parse_document};
