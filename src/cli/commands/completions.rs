//! `sentinel completions` — generate shell completion scripts.

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{Result, SentinelError};

/// Execute the `completions` command.
pub fn execute(shell: &str) -> Result<()> {
    let shell: Shell = shell.parse().map_err(|_| {
        SentinelError::CommandFailed(format!(
            "unsupported shell '{shell}' — use bash, zsh, fish, or powershell"
        ))
    })?;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());

    Ok(())
}
