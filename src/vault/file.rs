//! JSON vault file format.
//!
//! A vault is one pretty-printed JSON document:
//!
//! ```json
//! {
//!   "header": {
//!     "version": 2,
//!     "salt": "<base64>",
//!     "argon2_params": { "memory_kib": 65536, "iterations": 3, "parallelism": 4 },
//!     "created_at": "2026-01-12T09:30:00Z"
//!   },
//!   "records": {
//!     "openai_api_key": { "ciphertext": "<base64>", ... }
//!   }
//! }
//! ```
//!
//! The header carries everything needed to re-derive the master key on
//! the next open: the random Argon2id salt and the exact KDF parameters
//! used at creation time.  Records are a name-keyed map; map order is
//! not semantically significant, but `BTreeMap` keeps the serialized
//! form deterministic so vault diffs stay readable.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{base64_decode, base64_encode, KeyMetadata, VaultRecord};
use crate::crypto::Argon2Params;

/// Current vault format version.
pub const CURRENT_VERSION: u8 = 2;

/// Argon2 parameters stored in the vault header so the exact same KDF
/// settings are used when re-opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArgon2Params {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for StoredArgon2Params {
    fn default() -> Self {
        Self::from(Argon2Params::default())
    }
}

impl From<Argon2Params> for StoredArgon2Params {
    fn from(p: Argon2Params) -> Self {
        Self {
            memory_kib: p.memory_kib,
            iterations: p.iterations,
            parallelism: p.parallelism,
        }
    }
}

impl StoredArgon2Params {
    /// Convert back into crypto-layer params.
    pub fn to_params(self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.memory_kib,
            iterations: self.iterations,
            parallelism: self.parallelism,
        }
    }
}

/// Metadata stored at the top of a vault file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultHeader {
    /// Format version.
    pub version: u8,

    /// The salt used for Argon2id key derivation (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// Argon2 params used at vault creation.
    pub argon2_params: StoredArgon2Params,

    /// When this vault was first created.
    pub created_at: DateTime<Utc>,
}

/// The complete in-memory representation of a vault file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultFile {
    pub header: VaultHeader,

    /// Key name -> encrypted record.
    pub records: BTreeMap<String, VaultRecord>,
}

impl VaultFile {
    /// Build a fresh, empty vault around a newly generated salt.
    pub fn new(salt: Vec<u8>, params: Argon2Params) -> Self {
        Self {
            header: VaultHeader {
                version: CURRENT_VERSION,
                salt,
                argon2_params: StoredArgon2Params::from(params),
                created_at: Utc::now(),
            },
            records: BTreeMap::new(),
        }
    }

    /// Number of records in the vault.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the vault holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over `(key_name, ciphertext)` pairs.
    ///
    /// Used by `CipherSession::validate` to prove a password against
    /// whatever record comes first.
    pub fn record_iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.records
            .iter()
            .map(|(name, record)| (name.as_str(), record.ciphertext.as_slice()))
    }

    /// Metadata for every record, in name order.
    pub fn metadata(&self) -> Vec<KeyMetadata> {
        self.records
            .iter()
            .map(|(name, record)| KeyMetadata {
                name: name.clone(),
                created_at: record.created_at,
                updated_at: record.updated_at,
            })
            .collect()
    }
}
