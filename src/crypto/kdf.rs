//! Passphrase-to-key derivation.
//!
//! The vault cipher never uses the master passphrase as raw key
//! material.  Every sealed blob carries a random salt and the id of
//! the KDF that turned `passphrase + salt` into the 32-byte AES key,
//! so the configured KDF can change without breaking older blobs.
//!
//! Two derivations exist:
//! - `Kdf::Sha256`: one SHA-256 pass over `salt || passphrase`.  Fast;
//!   the default.
//! - `Kdf::Argon2id`: memory-hard Argon2id with explicit parameters.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::errors::{BitVaultError, Result};

/// Length of the per-blob salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Upper bounds on Argon2 cost.  Blob headers are untrusted input, so a
/// corrupted or crafted header must not be able to stall decryption.
const MAX_MEMORY_KIB: u32 = 1_048_576;
const MAX_ITERATIONS: u32 = 64;
const MAX_PARALLELISM: u32 = 64;

/// On-disk KDF identifiers.
const KDF_ID_SHA256: u8 = 0;
const KDF_ID_ARGON2ID: u8 = 1;

/// Encoded size of `Argon2Params` inside a blob header (3 x u32 LE).
const ARGON2_PARAMS_LEN: usize = 12;

/// Configurable Argon2id parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Argon2Params {
    /// Check the parameters against the accepted cost range.
    pub fn validate(&self) -> Result<()> {
        let bounded = |name: &str, value: u32, min: u32, max: u32| {
            if (min..=max).contains(&value) {
                Ok(())
            } else {
                Err(BitVaultError::KeyDerivationFailed(format!(
                    "Argon2 {name} must be between {min} and {max} (got {value})"
                )))
            }
        };
        bounded("memory_kib", self.memory_kib, MIN_MEMORY_KIB, MAX_MEMORY_KIB)?;
        bounded("iterations", self.iterations, 1, MAX_ITERATIONS)?;
        bounded("parallelism", self.parallelism, 1, MAX_PARALLELISM)
    }
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// The key-derivation function used to seal a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kdf {
    #[default]
    Sha256,
    Argon2id(Argon2Params),
}

impl Kdf {
    /// Derive a 32-byte key from `passphrase` and `salt`.
    ///
    /// The same passphrase + salt + KDF always produce the same key.
    pub fn derive(&self, passphrase: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
        match self {
            Kdf::Sha256 => Ok(derive_sha256(passphrase, salt)),
            Kdf::Argon2id(params) => derive_argon2id(passphrase, salt, params),
        }
    }

    /// Append the KDF id and its parameters to a blob header.
    pub(crate) fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Kdf::Sha256 => out.push(KDF_ID_SHA256),
            Kdf::Argon2id(params) => {
                out.push(KDF_ID_ARGON2ID);
                out.extend_from_slice(&params.memory_kib.to_le_bytes());
                out.extend_from_slice(&params.iterations.to_le_bytes());
                out.extend_from_slice(&params.parallelism.to_le_bytes());
            }
        }
    }

    /// Parse a KDF id and parameters from the start of `data`.
    ///
    /// Returns the KDF and the number of bytes consumed.
    pub(crate) fn decode_from(data: &[u8]) -> Result<(Self, usize)> {
        let (&id, rest) = data
            .split_first()
            .ok_or_else(|| BitVaultError::KeyDerivationFailed("missing KDF id".into()))?;

        match id {
            KDF_ID_SHA256 => Ok((Kdf::Sha256, 1)),
            KDF_ID_ARGON2ID => {
                if rest.len() < ARGON2_PARAMS_LEN {
                    return Err(BitVaultError::KeyDerivationFailed(
                        "truncated Argon2 parameters".into(),
                    ));
                }
                let word = |i: usize| {
                    let mut bytes = [0u8; 4];
                    bytes.copy_from_slice(&rest[i * 4..i * 4 + 4]);
                    u32::from_le_bytes(bytes)
                };
                let params = Argon2Params {
                    memory_kib: word(0),
                    iterations: word(1),
                    parallelism: word(2),
                };
                params.validate()?;
                Ok((Kdf::Argon2id(params), 1 + ARGON2_PARAMS_LEN))
            }
            other => Err(BitVaultError::KeyDerivationFailed(format!(
                "unknown KDF id {other}"
            ))),
        }
    }

    /// Short human-readable name (matches the config file spelling).
    pub fn name(&self) -> &'static str {
        match self {
            Kdf::Sha256 => "sha256",
            Kdf::Argon2id(_) => "argon2id",
        }
    }
}

/// Single SHA-256 pass over `salt || passphrase`.
fn derive_sha256(passphrase: &[u8], salt: &[u8]) -> [u8; KEY_LEN] {
    let digest = Sha256::new()
        .chain_update(salt)
        .chain_update(passphrase)
        .finalize();
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&digest);
    key
}

/// Derive a 32-byte key with explicit Argon2id parameters.
///
/// Parameters outside the accepted cost range are refused.
fn derive_argon2id(
    passphrase: &[u8],
    salt: &[u8],
    argon2_params: &Argon2Params,
) -> Result<[u8; KEY_LEN]> {
    argon2_params.validate()?;

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| BitVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut key)
        .map_err(|e| BitVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
