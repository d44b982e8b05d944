//! Vault module — encrypted key storage.
//!
//! This module provides:
//! - `VaultRecord` and `KeyMetadata` types (`record`)
//! - The JSON vault file format with salted header (`file`)
//! - Atomic single-file persistence (`store`)
//! - Transactional add/list/load/delete/rotate/change-password
//!   operations (`manager`)

pub mod file;
pub mod manager;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use file::{StoredArgon2Params, VaultFile, VaultHeader, CURRENT_VERSION};
pub use manager::{AddOutcome, VaultManager};
pub use record::{KeyMetadata, VaultRecord};
pub use store::VaultStore;
