//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, SentinelError};
use crate::vault::{VaultManager, VaultStore};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Sentinel CLI: secure your API keys before they leak.
#[derive(Parser)]
#[command(
    name = "sentinel",
    about = "Scan for hardcoded secrets and manage an encrypted key vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file path (default: ~/.sentinel/vault.json)
    #[arg(long, global = true)]
    pub vault_path: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Scan a file or directory for hardcoded secrets
    Check {
        /// Path to scan
        path: String,

        /// Report findings only, skip the interactive remediation prompts
        #[arg(long)]
        no_fix: bool,
    },

    /// Store a key in the vault (overwrites an existing name)
    Add {
        /// Key name (omit for interactive prompt)
        key: Option<String>,
        /// Key value (omit for hidden prompt)
        value: Option<String>,
    },

    /// List stored key names
    List,

    /// Decrypt and print a key's value
    Load {
        /// Key name
        key: String,
    },

    /// Delete a key from the vault
    Delete {
        /// Key name
        key: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Replace the value of an existing key
    Rotate {
        /// Key name
        key: String,
        /// New value (omit for hidden prompt)
        value: Option<String>,
    },

    /// Change the vault password (re-encrypts every key)
    ChangePassword,

    /// Run commands through a conversational AI assistant
    #[cfg(feature = "ai-agent")]
    Agent {
        /// Chat completions endpoint
        #[arg(long, default_value = "https://api.openai.com/v1/chat/completions")]
        endpoint: String,

        /// Model name
        #[arg(long, default_value = "gpt-4o-mini")]
        model: String,

        /// Vault key holding the API key for the endpoint
        #[arg(long, default_value = "openai_api_key")]
        api_key_name: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the vault password, trying in order:
/// 1. `SENTINEL_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("SENTINEL_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| SentinelError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `change-password`
/// and on first vault creation).
///
/// Also respects `SENTINEL_PASSWORD` for scripted/CI usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("SENTINEL_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(SentinelError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose vault password")
            .with_confirmation(
                "Confirm vault password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| SentinelError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Resolve the vault path and build a `VaultManager` from CLI arguments
/// and `.sentinel.toml`.
///
/// Precedence: `--vault-path` flag, then config file, then the default
/// `~/.sentinel/vault.json`.
pub fn build_manager(cli: &Cli) -> Result<(VaultManager, Settings)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;

    let path = match cli.vault_path.as_ref().map(PathBuf::from) {
        Some(p) => p,
        None => match settings.vault_path() {
            Some(p) => p,
            None => VaultStore::default_path()?,
        },
    };

    let store = VaultStore::new(path);
    let manager = VaultManager::with_params(store, settings.argon2_params());
    Ok((manager, settings))
}
