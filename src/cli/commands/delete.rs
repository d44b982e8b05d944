//! `sentinel delete` — remove a key from the vault.
//!
//! Destructive, so the vault password is required even though the
//! deleted value is never decrypted.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{build_manager, prompt_password, Cli};
use crate::errors::{Result, SentinelError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, key: &str, force: bool) -> Result<()> {
    let (manager, _) = build_manager(cli)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete key '{key}'?"))
            .default(false)
            .interact()
            .map_err(|e| SentinelError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let password = prompt_password()?;
    let session = manager.unlock(password.as_bytes())?;

    manager.delete_key(&session, key)?;

    output::success(&format!("Deleted key '{key}'"));

    Ok(())
}
