//! Record types stored inside a vault.
//!
//! Each record holds an encrypted value (as raw bytes) and its
//! creation/update timestamps; the key name is the map key in the vault
//! file.  The `ciphertext` field uses custom serde helpers so it
//! serializes as a base64 string in JSON rather than a raw byte array,
//! keeping the vault file human-diffable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single encrypted entry in the vault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultRecord {
    /// The encrypted value bytes (nonce + ciphertext), base64 in JSON.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,

    /// When this record was first created.
    pub created_at: DateTime<Utc>,

    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Lightweight metadata about a record (no ciphertext).
///
/// Returned by `VaultManager::list_keys` so callers can display key
/// names and timestamps without touching any ciphertext.
#[derive(Debug, Clone)]
pub struct KeyMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
