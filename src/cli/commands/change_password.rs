//! `sentinel change-password` — re-encrypt the vault under a new password.
//!
//! Every key is decrypted with the old password and re-encrypted under
//! a key derived from the new password and a fresh salt.  The vault is
//! written once, atomically, only after every record decrypted cleanly.

use crate::cli::output;
use crate::cli::{build_manager, prompt_new_password, prompt_password, Cli};
use crate::errors::Result;

/// Execute the `change-password` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (manager, _) = build_manager(cli)?;

    // 1. Prove the current password against the vault.
    output::info("Enter your current vault password.");
    let old_password = prompt_password()?;
    let session = manager.unlock(old_password.as_bytes())?;

    // 2. Choose the new one.
    output::info("Choose your new vault password.");
    let new_password = prompt_new_password()?;

    // 3. Decrypt-all / re-encrypt-all / single atomic write.
    let count = manager.change_password(&session, new_password.as_bytes())?;

    output::success(&format!(
        "Vault password updated ({count} key(s) re-encrypted)"
    ));

    Ok(())
}
