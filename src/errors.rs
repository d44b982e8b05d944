use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Sentinel.
#[derive(Debug, Error)]
pub enum SentinelError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong password or corrupted data")]
    DecryptionFailed,

    #[error("Invalid password for this vault")]
    InvalidPassword,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Key '{0}' not found in the vault")]
    KeyNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // --- Scanner errors ---
    #[error("Scan path does not exist: {0}")]
    ScanPathNotFound(PathBuf),

    #[error("Invalid detection pattern '{0}': {1}")]
    InvalidPattern(String, String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Password mismatch — passwords do not match")]
    PasswordMismatch,

    // --- Agent errors ---
    #[error("AI interpreter error: {0}")]
    AgentError(String),
}

/// Convenience type alias for Sentinel results.
pub type Result<T> = std::result::Result<T, SentinelError>;
