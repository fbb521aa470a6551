//! AES-256-GCM authenticated encryption.
//!
//! Two layers live here:
//!
//! - `encrypt` / `decrypt` work on raw bytes with a 32-byte key.  Each
//!   call generates a fresh random 12-byte nonce and prepends it:
//!   `[ 12-byte nonce | ciphertext + 16-byte auth tag ]`.
//!
//! - `Cipher` seals strings and serializable values under a passphrase.
//!   Every call draws a new salt, derives the key through the configured
//!   `Kdf`, and returns base64 text of the envelope:
//!
//! ```text
//! [version: 1 byte][kdf id + params][salt: 16 bytes][nonce: 12 bytes][ciphertext + tag]
//! ```
//!
//! Opening an envelope never returns an error.  A wrong passphrase,
//! tampered bytes, bad base64 or a non-UTF-8 payload all collapse to
//! `None`; callers must treat `None` as failure, not as an empty secret.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use zeroize::Zeroize;

use super::kdf::{generate_salt, Kdf, SALT_LEN};
use crate::errors::{BitVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Current envelope format version.
pub const ENVELOPE_VERSION: u8 = 1;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| BitVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| BitVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Expects the first 12 bytes to be the nonce, followed by the ciphertext.
pub fn decrypt(key: &[u8], ciphertext_with_nonce: &[u8]) -> Result<Vec<u8>> {
    if ciphertext_with_nonce.len() < NONCE_LEN {
        return Err(BitVaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| BitVaultError::DecryptionFailed)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| BitVaultError::DecryptionFailed)
}

/// Passphrase-based sealing of strings and JSON values.
///
/// The `Kdf` only governs *sealing*; opening reads the KDF recorded in
/// the envelope, so blobs written under another KDF still open.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cipher {
    kdf: Kdf,
}

impl Cipher {
    pub fn new(kdf: Kdf) -> Self {
        Self { kdf }
    }

    /// The KDF used for new envelopes.
    pub fn kdf(&self) -> &Kdf {
        &self.kdf
    }

    /// Encrypt `plaintext` under `passphrase`.
    ///
    /// Two calls with the same inputs produce different output (fresh
    /// salt and nonce) that both decrypt to the same plaintext.
    pub fn encrypt_string(&self, plaintext: &str, passphrase: &str) -> Result<String> {
        let salt = generate_salt();
        let mut key = self.kdf.derive(passphrase.as_bytes(), &salt)?;
        let sealed = encrypt(&key, plaintext.as_bytes());
        key.zeroize();
        let sealed = sealed?;

        let mut envelope = Vec::with_capacity(2 + SALT_LEN + sealed.len() + 12);
        envelope.push(ENVELOPE_VERSION);
        self.kdf.encode_into(&mut envelope);
        envelope.extend_from_slice(&salt);
        envelope.extend_from_slice(&sealed);

        Ok(BASE64.encode(envelope))
    }

    /// Decrypt a string produced by `encrypt_string`.
    ///
    /// Returns `None` on any failure.
    pub fn decrypt_string(&self, ciphertext: &str, passphrase: &str) -> Option<String> {
        match open_envelope(ciphertext, passphrase) {
            Ok(plaintext) => Some(plaintext),
            Err(e) => {
                tracing::debug!("envelope rejected: {e}");
                None
            }
        }
    }

    /// Serialize `value` to JSON and encrypt it.
    pub fn encrypt_object<T: Serialize + ?Sized>(&self, value: &T, passphrase: &str) -> Result<String> {
        let mut json = serde_json::to_string(value)
            .map_err(|e| BitVaultError::SerializationError(format!("encrypt object: {e}")))?;
        let sealed = self.encrypt_string(&json, passphrase);
        json.zeroize();
        sealed
    }

    /// Decrypt and parse a value produced by `encrypt_object`.
    ///
    /// Returns `None` if decryption fails or the JSON does not match `T`.
    pub fn decrypt_object<T: DeserializeOwned>(&self, ciphertext: &str, passphrase: &str) -> Option<T> {
        let mut json = self.decrypt_string(ciphertext, passphrase)?;
        let parsed = serde_json::from_str(&json);
        json.zeroize();
        match parsed {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("decrypted payload is not the expected shape: {e}");
                None
            }
        }
    }
}

/// Parse and open an envelope, reporting why it failed.
fn open_envelope(ciphertext: &str, passphrase: &str) -> Result<String> {
    let data = BASE64
        .decode(ciphertext.trim())
        .map_err(|_| BitVaultError::DecryptionFailed)?;

    let (&version, rest) = data.split_first().ok_or(BitVaultError::DecryptionFailed)?;
    if version != ENVELOPE_VERSION {
        return Err(BitVaultError::SerializationError(format!(
            "unsupported envelope version {version}, expected {ENVELOPE_VERSION}"
        )));
    }

    let (kdf, used) = Kdf::decode_from(rest)?;
    let rest = &rest[used..];
    if rest.len() < SALT_LEN {
        return Err(BitVaultError::DecryptionFailed);
    }
    let (salt, sealed) = rest.split_at(SALT_LEN);

    let mut key = kdf.derive(passphrase.as_bytes(), salt)?;
    let plaintext = decrypt(&key, sealed);
    key.zeroize();

    String::from_utf8(plaintext?).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        BitVaultError::DecryptionFailed
    })
}
