//! `sentinel add` — store a key in the vault.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{build_manager, prompt_password, Cli};
use crate::errors::{Result, SentinelError};
use crate::vault::AddOutcome;

/// Execute the `add` command.
pub fn execute(cli: &Cli, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let (manager, _) = build_manager(cli)?;

    let key = match key {
        Some(k) => k.to_string(),
        None => dialoguer::Input::new()
            .with_prompt("Key name (e.g. 'openai_key')")
            .interact_text()
            .map_err(|e| SentinelError::CommandFailed(format!("input prompt: {e}")))?,
    };

    // Determine the value from one of three sources.
    let value: Zeroizing<String> = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end().to_string())
    } else {
        // Source 3: Interactive hidden prompt (default).
        let v = dialoguer::Password::new()
            .with_prompt(format!("Enter value for {key}"))
            .interact()
            .map_err(|e| SentinelError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(v)
    };

    // A missing vault file is the normal first-run case here.
    let password = prompt_password()?;
    let session = manager.unlock_or_init(password.as_bytes())?;

    match manager.add_key(&session, &key, &value)? {
        AddOutcome::Added => {
            output::success(&format!("Key '{key}' stored in the vault"));
        }
        AddOutcome::Overwrote => {
            output::warning(&format!("Key '{key}' already existed — value overwritten"));
        }
    }

    output::tip(&format!("Use it in your code: {key} = load_key(\"{key}\")"));

    Ok(())
}
