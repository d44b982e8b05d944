//! Password-derived cipher session.
//!
//! A `CipherSession` holds the Argon2id-derived master key for one
//! process invocation, plus a flag recording whether the password has
//! been proven against an existing vault.  It is created by the caller
//! and passed explicitly into every vault operation — there is no
//! module-global cached cipher.  The session is never written to disk;
//! the master key is zeroized when the session is dropped.

use zeroize::Zeroize;

use super::encryption::{decrypt, encrypt};
use super::kdf::{derive_master_key, Argon2Params};
use super::keys::MasterKey;
use crate::errors::{Result, SentinelError};

/// Symmetric encryption context derived from a vault password.
pub struct CipherSession {
    master: MasterKey,
    validated: bool,
}

impl CipherSession {
    /// Derive a session from a password and the vault's persisted salt.
    ///
    /// The returned session is not yet validated — call [`validate`]
    /// against the vault's existing records before trusting it.
    ///
    /// [`validate`]: CipherSession::validate
    pub fn derive(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<Self> {
        let mut master_bytes = derive_master_key(password, salt, params)?;
        let master = MasterKey::new(master_bytes);
        master_bytes.zeroize();

        Ok(Self {
            master,
            validated: false,
        })
    }

    /// Encrypt a plaintext value under the per-record key for `key_name`.
    pub fn encrypt_record(&self, key_name: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut record_key = self.master.derive_record_key(key_name)?;
        let ciphertext = encrypt(&record_key, plaintext);
        record_key.zeroize();
        ciphertext
    }

    /// Decrypt a ciphertext produced by [`encrypt_record`] for `key_name`.
    ///
    /// Fails with `DecryptionFailed` if the password is wrong, the
    /// ciphertext was corrupted, or it belongs to a different key name.
    ///
    /// [`encrypt_record`]: CipherSession::encrypt_record
    pub fn decrypt_record(&self, key_name: &str, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut record_key = self.master.derive_record_key(key_name)?;
        let plaintext = decrypt(&record_key, ciphertext);
        record_key.zeroize();
        plaintext
    }

    /// Prove this session's password against existing vault records.
    ///
    /// Decrypts the first record offered by the iterator; success marks
    /// the whole session as validated.  An empty iterator (new or empty
    /// vault) validates trivially — there is nothing the password could
    /// contradict.  Failure is reported as `InvalidPassword` and the
    /// session stays unvalidated.
    pub fn validate<'a, I>(&mut self, mut records: I) -> Result<()>
    where
        I: Iterator<Item = (&'a str, &'a [u8])>,
    {
        if self.validated {
            return Ok(());
        }

        if let Some((name, ciphertext)) = records.next() {
            self.decrypt_record(name, ciphertext)
                .map_err(|_| SentinelError::InvalidPassword)?;
        }

        self.validated = true;
        Ok(())
    }

    /// Whether this session has been validated against the vault.
    pub fn is_validated(&self) -> bool {
        self.validated
    }
}
