//! Directory-backed `KeyValueStore`.
//!
//! Each record is one file named after its key inside the data
//! directory (default `.bitvault/`).  Writes go to a temp file in the
//! same directory and are renamed over the target, so a reader never
//! sees a half-written blob.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{validate_key, KeyValueStore};
use crate::errors::{BitVaultError, Result};

/// A key-value store that keeps one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    ///
    /// On Unix the directory is restricted to the owner (0o700).
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                BitVaultError::StorageUnavailable(format!(
                    "cannot create data directory {}: {e}",
                    dir.display()
                ))
            })?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = fs::Permissions::from_mode(0o700);
                if let Err(e) = fs::set_permissions(dir, perms) {
                    tracing::warn!(dir = %dir.display(), "cannot restrict data directory: {e}");
                }
            }
        } else if !dir.is_dir() {
            return Err(BitVaultError::StorageUnavailable(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BitVaultError::StorageUnavailable(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key)?;
        let tmp_path = self.dir.join(format!(".{key}.tmp"));

        fs::write(&tmp_path, value).map_err(|e| {
            BitVaultError::StorageUnavailable(format!("cannot write {}: {e}", tmp_path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            if let Err(e) = fs::set_permissions(&tmp_path, perms) {
                tracing::warn!(path = %tmp_path.display(), "cannot restrict record file: {e}");
            }
        }

        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            BitVaultError::StorageUnavailable(format!("cannot replace {}: {e}", path.display()))
        })?;

        tracing::debug!(key, bytes = value.len(), "record written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BitVaultError::StorageUnavailable(format!(
                "cannot remove {}: {e}",
                path.display()
            ))),
        }
    }
}
