//! Cryptographic primitives for Sentinel.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id password-based key derivation (`kdf`)
//! - HKDF-based per-record key derivation (`keys`)
//! - The password-derived `CipherSession` passed into vault operations
//!   (`session`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod session;

// Re-export the most commonly used items.
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_master_key, generate_salt, Argon2Params};
pub use keys::{derive_record_key, MasterKey};
pub use session::CipherSession;
