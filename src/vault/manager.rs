//! High-level vault operations used by CLI commands and the agent.
//!
//! Every operation is a short transaction: load the vault file, mutate
//! it in memory, save a complete snapshot.  The `CipherSession` is
//! passed in explicitly by the caller; the manager never prompts for a
//! password and never caches key material itself.

use chrono::Utc;
use zeroize::{Zeroize, Zeroizing};

use super::file::VaultFile;
use super::record::{KeyMetadata, VaultRecord};
use super::store::VaultStore;
use crate::crypto::{generate_salt, Argon2Params, CipherSession};
use crate::errors::{Result, SentinelError};

/// Whether `add_key` created a new record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Overwrote,
}

/// Composes a `VaultStore` and a `CipherSession` into the add / list /
/// load / delete / rotate / change-password operations.
pub struct VaultManager {
    store: VaultStore,
    params: Argon2Params,
}

impl VaultManager {
    /// Create a manager with default Argon2 parameters.
    pub fn new(store: VaultStore) -> Self {
        Self::with_params(store, Argon2Params::default())
    }

    /// Create a manager with explicit Argon2 parameters.
    ///
    /// The parameters apply when a new vault is created or the password
    /// changes; opening an existing vault always uses the parameters
    /// persisted in its header.
    pub fn with_params(store: VaultStore, params: Argon2Params) -> Self {
        Self { store, params }
    }

    /// The underlying store.
    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    // ------------------------------------------------------------------
    // Session handling
    // ------------------------------------------------------------------

    /// Derive a session for an existing vault and validate the password
    /// against its records.
    ///
    /// Fails with `VaultNotFound` if no vault file exists, and with
    /// `InvalidPassword` if an existing record does not decrypt.
    pub fn unlock(&self, password: &[u8]) -> Result<CipherSession> {
        let vault = self.store.load()?;
        self.derive_validated(&vault, password)
    }

    /// Like [`unlock`], but creates an empty vault (fresh random salt)
    /// if none exists yet.  Used by `add`, where a missing vault is the
    /// normal first-run case rather than an error.
    ///
    /// [`unlock`]: VaultManager::unlock
    pub fn unlock_or_init(&self, password: &[u8]) -> Result<CipherSession> {
        match self.store.load_opt()? {
            Some(vault) => self.derive_validated(&vault, password),
            None => {
                let salt = generate_salt()?;
                let vault = VaultFile::new(salt.to_vec(), self.params);
                self.store.save(&vault)?;
                self.derive_validated(&vault, password)
            }
        }
    }

    fn derive_validated(&self, vault: &VaultFile, password: &[u8]) -> Result<CipherSession> {
        let stored = vault.header.argon2_params;
        let mut session =
            CipherSession::derive(password, &vault.header.salt, &stored.to_params())?;
        session.validate(vault.record_iter())?;
        Ok(session)
    }

    // ------------------------------------------------------------------
    // Key operations
    // ------------------------------------------------------------------

    /// Add or overwrite a key.
    ///
    /// An existing name is replaced last-write-wins; the caller learns
    /// which happened via the returned [`AddOutcome`] so it can warn.
    /// The original creation timestamp survives an overwrite.
    pub fn add_key(&self, session: &CipherSession, name: &str, value: &str) -> Result<AddOutcome> {
        validate_key_name(name)?;
        if value.is_empty() {
            return Err(SentinelError::InvalidInput(
                "key value cannot be empty".into(),
            ));
        }
        ensure_validated(session)?;

        let mut vault = self.store.load()?;
        let ciphertext = session.encrypt_record(name, value.as_bytes())?;

        let now = Utc::now();
        let outcome = match vault.records.get(name) {
            Some(existing) => {
                let created_at = existing.created_at;
                vault.records.insert(
                    name.to_string(),
                    VaultRecord {
                        ciphertext,
                        created_at,
                        updated_at: now,
                    },
                );
                AddOutcome::Overwrote
            }
            None => {
                vault.records.insert(
                    name.to_string(),
                    VaultRecord {
                        ciphertext,
                        created_at: now,
                        updated_at: now,
                    },
                );
                AddOutcome::Added
            }
        };

        self.store.save(&vault)?;
        Ok(outcome)
    }

    /// List metadata for all keys, in name order.
    ///
    /// Never decrypts anything and needs no session; a missing vault
    /// file presents as an empty listing, not an error.
    pub fn list_keys(&self) -> Result<Vec<KeyMetadata>> {
        match self.store.load_opt()? {
            Some(vault) => Ok(vault.metadata()),
            None => Ok(Vec::new()),
        }
    }

    /// Decrypt and return the plaintext value of a key.
    pub fn load_key(&self, session: &CipherSession, name: &str) -> Result<Zeroizing<String>> {
        let vault = self.store.load()?;
        let record = vault
            .records
            .get(name)
            .ok_or_else(|| SentinelError::KeyNotFound(name.to_string()))?;

        let plaintext_bytes = session.decrypt_record(name, &record.ciphertext)?;

        // from_utf8 takes ownership; on error, zeroize the bytes inside
        // the error before discarding.
        String::from_utf8(plaintext_bytes)
            .map(Zeroizing::new)
            .map_err(|e| {
                let mut bad_bytes = e.into_bytes();
                bad_bytes.zeroize();
                SentinelError::SerializationError("key value is not valid UTF-8".to_string())
            })
    }

    /// Remove a key from the vault.
    ///
    /// Deletion is destructive, so a validated session is required even
    /// though the deleted plaintext is never touched.
    pub fn delete_key(&self, session: &CipherSession, name: &str) -> Result<()> {
        ensure_validated(session)?;

        let mut vault = self.store.load()?;
        if vault.records.remove(name).is_none() {
            return Err(SentinelError::KeyNotFound(name.to_string()));
        }

        self.store.save(&vault)
    }

    /// Replace the value of an existing key.
    ///
    /// The key must already exist.  Encryption happens before the vault
    /// is touched, so on any error the old record is left unchanged.
    pub fn rotate_key(&self, session: &CipherSession, name: &str, new_value: &str) -> Result<()> {
        if new_value.is_empty() {
            return Err(SentinelError::InvalidInput(
                "key value cannot be empty".into(),
            ));
        }
        ensure_validated(session)?;

        let mut vault = self.store.load()?;
        if !vault.records.contains_key(name) {
            return Err(SentinelError::KeyNotFound(name.to_string()));
        }

        let ciphertext = session.encrypt_record(name, new_value.as_bytes())?;

        // The lookup above guarantees the entry exists.
        if let Some(record) = vault.records.get_mut(name) {
            record.ciphertext = ciphertext;
            record.updated_at = Utc::now();
        }

        self.store.save(&vault)
    }

    /// Re-encrypt the whole vault under a new password.
    ///
    /// Decrypts every record under the old session first; if any record
    /// fails, the operation aborts before a single byte is written, so
    /// a partially re-encrypted vault is never observable.  Returns the
    /// number of re-encrypted records.
    pub fn change_password(
        &self,
        session: &CipherSession,
        new_password: &[u8],
    ) -> Result<usize> {
        ensure_validated(session)?;

        let vault = self.store.load()?;

        // Phase 1: decrypt everything into memory.  Any failure here
        // leaves the file byte-identical to its pre-operation state.
        let mut plaintexts: Vec<(String, Zeroizing<Vec<u8>>, VaultRecord)> = Vec::new();
        for (name, record) in &vault.records {
            let plaintext = session.decrypt_record(name, &record.ciphertext)?;
            plaintexts.push((name.clone(), Zeroizing::new(plaintext), record.clone()));
        }

        // Phase 2: fresh salt, new session, re-encrypt.
        let new_salt = generate_salt()?;
        let mut new_vault = VaultFile::new(new_salt.to_vec(), self.params);
        new_vault.header.created_at = vault.header.created_at;

        let new_session =
            CipherSession::derive(new_password, &new_vault.header.salt, &self.params)?;

        for (name, plaintext, old_record) in &plaintexts {
            let ciphertext = new_session.encrypt_record(name, plaintext)?;
            new_vault.records.insert(
                name.clone(),
                VaultRecord {
                    ciphertext,
                    created_at: old_record.created_at,
                    updated_at: old_record.updated_at,
                },
            );
        }

        // Phase 3: single atomic write.
        self.store.save(&new_vault)?;
        Ok(plaintexts.len())
    }
}

/// Reject sessions whose password was never proven against the vault.
fn ensure_validated(session: &CipherSession) -> Result<()> {
    if session.is_validated() {
        Ok(())
    } else {
        Err(SentinelError::InvalidPassword)
    }
}

/// Validate that a key name is safe.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty and at most 256 characters.
fn validate_key_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SentinelError::InvalidInput("key name cannot be empty".into()));
    }
    if name.len() > 256 {
        return Err(SentinelError::InvalidInput(
            "key name cannot exceed 256 characters".into(),
        ));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(SentinelError::InvalidInput(format!(
            "key name '{name}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_key_names() {
        assert!(validate_key_name("openai_key").is_ok());
        assert!(validate_key_name("DATABASE_URL").is_ok());
        assert!(validate_key_name("stripe.live-2024").is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(validate_key_name("").is_err());
    }

    #[test]
    fn rejects_special_chars() {
        assert!(validate_key_name("my key").is_err());
        assert!(validate_key_name("key/name").is_err());
        assert!(validate_key_name("key\nname").is_err());
    }

    #[test]
    fn rejects_too_long_name() {
        let long_name = "a".repeat(257);
        assert!(validate_key_name(&long_name).is_err());
    }
}
