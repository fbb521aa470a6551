//! One-way digest used to verify the master key.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Lower-case hex SHA-256 digest of `data` (64 characters).
pub fn hash(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

/// Check `data` against a stored digest in constant time.
pub fn verify_hash(data: &str, expected: &str) -> bool {
    hash(data).as_bytes().ct_eq(expected.as_bytes()).into()
}
