use thiserror::Error;

/// All errors that can occur in BitVault.
#[derive(Debug, Error)]
pub enum BitVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong master key or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Authentication errors ---
    #[error("Incorrect master key")]
    AuthenticationFailed,

    #[error("Master key must be at least {min} characters")]
    MasterKeyTooShort { min: usize },

    #[error("Password mismatch — master keys do not match")]
    PasswordMismatch,

    #[error("No master key has been set up yet — run `bitvault init`")]
    VaultNotInitialized,

    #[error("A master key already exists for this vault")]
    VaultAlreadyInitialized,

    #[error("Vault is locked — authenticate first")]
    Locked,

    // --- Vault errors ---
    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Import failed: {0}")]
    ImportParse(String),

    // --- Storage errors ---
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Invalid storage key '{0}'")]
    InvalidStorageKey(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("Audit error: {0}")]
    AuditError(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for BitVault results.
pub type Result<T> = std::result::Result<T, BitVaultError>;
