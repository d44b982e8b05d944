//! `sentinel load` — retrieve and print a single key's value.

use crate::cli::{build_manager, prompt_password, Cli};
use crate::errors::Result;

/// Execute the `load` command.
pub fn execute(cli: &Cli, key: &str) -> Result<()> {
    let (manager, _) = build_manager(cli)?;

    let password = prompt_password()?;
    let session = manager.unlock(password.as_bytes())?;

    // Decrypt and print the value to stdout (script-friendly).
    let value = manager.load_key(&session, key)?;
    println!("{}", value.as_str());

    Ok(())
}
