//! `sentinel rotate` — replace the value of an existing key.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{build_manager, prompt_password, Cli};
use crate::errors::{Result, SentinelError};

/// Execute the `rotate` command.
pub fn execute(cli: &Cli, key: &str, value: Option<&str>) -> Result<()> {
    let (manager, _) = build_manager(cli)?;

    let new_value: Zeroizing<String> = match value {
        Some(v) => {
            output::warning("Value provided on command line — it may appear in shell history.");
            Zeroizing::new(v.to_string())
        }
        None => {
            let v = dialoguer::Password::new()
                .with_prompt(format!("Enter new value for '{key}'"))
                .interact()
                .map_err(|e| SentinelError::CommandFailed(format!("input prompt: {e}")))?;
            Zeroizing::new(v)
        }
    };

    let password = prompt_password()?;
    let session = manager.unlock(password.as_bytes())?;

    manager.rotate_key(&session, key, &new_value)?;

    output::success(&format!("Key '{key}' rotated"));

    Ok(())
}
