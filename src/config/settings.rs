use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::{Argon2Params, Cipher, Kdf};
use crate::errors::{BitVaultError, Result};
use crate::vault::UnreadableVaultPolicy;

/// Which KDF seals new vault blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KdfChoice {
    #[default]
    Sha256,
    Argon2id,
}

/// What to do with a vault blob the master key cannot decrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnreadableVault {
    #[default]
    Empty,
    Reject,
}

/// Project-level configuration, loaded from `.bitvault.toml`.
///
/// Every field has a sensible default so BitVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) where vault records are stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// KDF for new blobs: "sha256" (default) or "argon2id".
    #[serde(default)]
    pub kdf: KdfChoice,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// "empty" (default) or "reject".
    #[serde(default)]
    pub unreadable_vault: UnreadableVault,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".bitvault".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            kdf: KdfChoice::default(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            unreadable_vault: UnreadableVault::default(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".bitvault.toml";

    /// Load settings from `<project_dir>/.bitvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            BitVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path of the data directory for a project.
    ///
    /// Example: `project_dir/.bitvault`
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// The cipher new blobs are sealed with.
    pub fn cipher(&self) -> Cipher {
        match self.kdf {
            KdfChoice::Sha256 => Cipher::new(Kdf::Sha256),
            KdfChoice::Argon2id => Cipher::new(Kdf::Argon2id(self.argon2_params())),
        }
    }

    pub fn unreadable_policy(&self) -> UnreadableVaultPolicy {
        match self.unreadable_vault {
            UnreadableVault::Empty => UnreadableVaultPolicy::TreatAsEmpty,
            UnreadableVault::Reject => UnreadableVaultPolicy::Reject,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
