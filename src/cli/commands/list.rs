//! `sentinel list` — display stored key names in a table.
//!
//! Metadata only: nothing is decrypted, so no password is required.

use crate::cli::output;
use crate::cli::{build_manager, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (manager, _) = build_manager(cli)?;

    let keys = manager.list_keys()?;

    if keys.is_empty() {
        output::info("No keys stored yet.");
        output::tip("Run `sentinel add` to store your first key.");
        return Ok(());
    }

    output::info(&format!("{} key(s) stored", keys.len()));
    output::print_keys_table(&keys);

    Ok(())
}
