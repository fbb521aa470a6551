//! Cryptographic primitives for BitVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and the passphrase `Cipher` (`encryption`)
//! - Passphrase key derivation, SHA-256 or Argon2id (`kdf`)
//! - The SHA-256 digest used for master-key verification (`hash`)

pub mod encryption;
pub mod hash;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{Cipher, hash, Kdf, ...};
pub use encryption::{decrypt, encrypt, Cipher};
pub use hash::{hash, verify_hash};
pub use kdf::{generate_salt, Argon2Params, Kdf};
