//! Key derivation helpers using HKDF-SHA256.
//!
//! From a single master key we derive a unique **per-record** encryption
//! key for each key name stored in the vault.  HKDF (RFC 5869) uses the
//! master key as input keying material and a context string (`info`) to
//! produce independent sub-keys, so compromising one encrypted value
//! does not reveal the others.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{Result, SentinelError};

/// Length of derived sub-keys (256 bits).
const KEY_LEN: usize = 32;

/// Derive a per-record encryption key from the master key.
///
/// `info` is set to `"sentinel-key:<key_name>"` to bind the derived key
/// to a specific vault entry.  Moving ciphertext between entries makes
/// it undecryptable.
pub fn derive_record_key(master_key: &[u8], key_name: &str) -> Result<[u8; KEY_LEN]> {
    let info = format!("sentinel-key:{key_name}");
    hkdf_derive(master_key, info.as_bytes())
}

/// Run HKDF-SHA256 expand with the given `info`.
///
/// The extract step is skipped and the master key used directly as the
/// pseudo-random key, because it already has full entropy (it came out
/// of Argon2id).
fn hkdf_derive(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| SentinelError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// A wrapper around a 32-byte master key that automatically zeroes
/// its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Derive a per-record encryption key from this master key.
    pub fn derive_record_key(&self, key_name: &str) -> Result<[u8; KEY_LEN]> {
        derive_record_key(&self.bytes, key_name)
    }
}
