//! Vault persistence — a single JSON file on disk.
//!
//! `VaultStore` owns the on-disk representation: where the file lives,
//! how it is read, and how snapshots are written.  All mutation
//! sequencing lives one layer up in `VaultManager`.

use std::fs;
use std::path::{Path, PathBuf};

use super::file::VaultFile;
use crate::errors::{Result, SentinelError};

/// Directory under the user's home that holds the vault file.
const VAULT_DIR: &str = ".sentinel";

/// File name of the vault inside the vault directory.
const VAULT_FILE: &str = "vault.json";

/// Handle to the vault file at a fixed path.
pub struct VaultStore {
    path: PathBuf,
}

impl VaultStore {
    /// Create a store operating on the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The default vault location: `~/.sentinel/vault.json`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            SentinelError::ConfigError("could not determine home directory".into())
        })?;
        Ok(home.join(VAULT_DIR).join(VAULT_FILE))
    }

    /// Path to the vault file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a vault file exists at this store's path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and parse the vault file.
    ///
    /// A missing file is `VaultNotFound` — callers that can work with
    /// an absent vault (list, check) should use [`load_opt`] instead.
    ///
    /// [`load_opt`]: VaultStore::load_opt
    pub fn load(&self) -> Result<VaultFile> {
        match self.load_opt()? {
            Some(vault) => Ok(vault),
            None => Err(SentinelError::VaultNotFound(self.path.clone())),
        }
    }

    /// Read and parse the vault file, mapping a missing file to `None`.
    pub fn load_opt(&self) -> Result<Option<VaultFile>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read(&self.path)?;
        let vault: VaultFile = serde_json::from_slice(&data)
            .map_err(|e| SentinelError::InvalidVaultFormat(e.to_string()))?;
        Ok(Some(vault))
    }

    /// Write a complete vault snapshot to disk **atomically**.
    ///
    /// Serializes to pretty JSON, writes to a temp file in the same
    /// directory, then renames over the target.  The rename ensures a
    /// concurrent reader never sees a half-written vault.
    pub fn save(&self, vault: &VaultFile) -> Result<()> {
        let mut data = serde_json::to_vec_pretty(vault)
            .map_err(|e| SentinelError::SerializationError(e.to_string()))?;
        data.push(b'\n');

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        // Temp file in the same directory so the rename stays on one
        // filesystem and is therefore atomic.
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &data)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}
